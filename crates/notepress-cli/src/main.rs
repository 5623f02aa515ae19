//! Command-line client for the note publishing API.
//!
//! Set PUBLISH_API_URL and PUBLISH_API_KEY (plus the optional upload settings)
//! in the environment or a .env file.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use notepress_api_client::ApiClient;
use notepress_cli::{init_tracing, truncate_string, view_url};
use notepress_core::{text, PublishConfig};
use notepress_publisher::{ContentPublisher, PublishEvent};
use tokio::sync::mpsc;
use notepress_storage::StorageUploader;
use notepress_vault::LocalVault;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "notepress", about = "Note publishing CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish a markdown file
    Publish {
        /// Path to the markdown file
        file: PathBuf,
        /// Title for the published note (defaults to the file name)
        #[arg(long)]
        title: Option<String>,
        /// Description (defaults to the note's first paragraph)
        #[arg(long)]
        description: Option<String>,
        /// Vault root for resolving image attachments (defaults to the file's directory)
        #[arg(long)]
        vault: Option<PathBuf>,
    },
    /// List published notes, most recently updated first
    List,
    /// Fetch a single published note by id
    Get {
        /// Note id
        id: String,
    },
    /// Unpublish (delete) a note by id
    Delete {
        /// Note id
        id: String,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

async fn publish(
    config: PublishConfig,
    client: &ApiClient,
    file: PathBuf,
    title: Option<String>,
    description: Option<String>,
    vault: Option<PathBuf>,
) -> anyhow::Result<()> {
    let content = tokio::fs::read_to_string(&file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let file_stem = file
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("note")
        .to_string();

    let vault_root = vault
        .or_else(|| file.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    let title = title.unwrap_or_else(|| file_stem.clone());
    let description = description.unwrap_or_else(|| text::extract_description(&content));

    let store = LocalVault::new(vault_root);
    let uploader = StorageUploader::from_config(&config)?;
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let publisher = ContentPublisher::new(config.clone(), store, uploader).with_events(events_tx);

    let note = publisher
        .build_note(&content, &file_stem, &title, &description)
        .await?;

    client.publish_note(&note).await?;
    publisher.notify_published(&note.id);

    // Confirmation output is driven by the publish notification channel.
    while let Ok(PublishEvent::NotePublished { id }) = events_rx.try_recv() {
        println!("Published \"{}\"", id);
        if let Some(base) = &config.published_url_base {
            println!("View: {}", view_url(base, &id));
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let config = PublishConfig::from_env();
    let client = ApiClient::from_config(&config)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Publish {
            file,
            title,
            description,
            vault,
        } => {
            publish(config, &client, file, title, description, vault).await?;
        }
        Commands::List => {
            let notes = client.list_notes().await?;
            for note in &notes {
                let metadata = note.metadata.as_ref();
                let updated = metadata
                    .and_then(|m| m.updated)
                    .map(|u| u.to_rfc3339())
                    .unwrap_or_else(|| "-".to_string());
                let description = metadata
                    .and_then(|m| m.description.as_deref())
                    .unwrap_or("");
                println!(
                    "{}  {}  {}",
                    updated,
                    note.id,
                    truncate_string(description, 60)
                );
                if let Some(base) = &config.published_url_base {
                    println!("    {}", view_url(base, &note.id));
                }
            }
            println!("Total notes: {}", notes.len());
        }
        Commands::Get { id } => {
            let note = client.fetch_note(&id).await?;
            print_json(&note)?;
        }
        Commands::Delete { id } => {
            client.delete_note(&id).await?;
            println!("Deleted \"{}\"", id);
        }
    }

    Ok(())
}
