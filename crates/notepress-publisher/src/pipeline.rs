//! The content-publishing pipeline.

use chrono::Utc;
use notepress_core::text::{content_type_for_extension, extract_image_references, extract_tags};
use notepress_core::{ImageReference, Note, NoteMetadata, PublishConfig, PublishError};
use notepress_storage::Uploader;
use notepress_vault::{resolve_attachment, FileStore};

use crate::events::{PublishEvent, PublishEventSender};

/// Orchestrates one publish operation over a configuration snapshot.
///
/// References are processed strictly sequentially, in extraction order. A
/// reference that cannot be resolved, read, or uploaded is left untouched in
/// the output; the rest of the document still publishes.
pub struct ContentPublisher<S, U> {
    config: PublishConfig,
    store: S,
    uploader: U,
    events: Option<PublishEventSender>,
}

impl<S: FileStore, U: Uploader> ContentPublisher<S, U> {
    pub fn new(config: PublishConfig, store: S, uploader: U) -> Self {
        ContentPublisher {
            config,
            store,
            uploader,
            events: None,
        }
    }

    /// Register an explicit notification channel. [`Self::notify_published`]
    /// sends on it after a successful transmission.
    pub fn with_events(mut self, events: PublishEventSender) -> Self {
        self.events = Some(events);
        self
    }

    pub fn config(&self) -> &PublishConfig {
        &self.config
    }

    /// Resolve, read, and upload one referenced image. `None` at any step
    /// means the reference stays as written.
    async fn upload_reference(&self, token: &str) -> Option<String> {
        let files = match self.store.list().await {
            Ok(files) => files,
            Err(e) => {
                tracing::error!(error = %e, "Failed to enumerate vault files");
                return None;
            }
        };

        let file = match resolve_attachment(&files, token, self.config.attachment_folder.as_deref())
        {
            Some(file) => file.clone(),
            None => {
                tracing::warn!(token = %token, "Image file not found in vault");
                return None;
            }
        };

        let data = match self.store.read(&file.path).await {
            Ok(data) => data,
            Err(e) => {
                tracing::error!(path = %file.path, error = %e, "Failed to read image file");
                return None;
            }
        };

        let content_type = content_type_for_extension(file.extension());
        self.uploader
            .upload(file.name(), &file.path, content_type, &data)
            .await
    }

    /// Rewrite embedded image references to uploaded URLs.
    ///
    /// When no upload destination is configured, or the document contains no
    /// references, the original text is returned verbatim.
    pub async fn process_images(&self, content: &str) -> String {
        if !self.config.upload_configured() {
            return content.to_string();
        }

        let references: Vec<ImageReference> = extract_image_references(content).collect();
        if references.is_empty() {
            return content.to_string();
        }

        let mut processed = content.to_string();
        for reference in &references {
            let Some(url) = self.upload_reference(&reference.path).await else {
                continue;
            };

            let label = reference.alt.as_deref().unwrap_or(&reference.path);
            let markdown_image = format!("![{}]({})", label, url);
            // Keyed by the exact matched substring; one occurrence per
            // reference, consumed in document order.
            processed = processed.replacen(&reference.original_text, &markdown_image, 1);
        }

        processed
    }

    /// Run the full pipeline and assemble the publishable artifact.
    ///
    /// The id is the trimmed title, falling back to the source file stem when
    /// the title is empty.
    pub async fn build_note(
        &self,
        content: &str,
        file_stem: &str,
        title: &str,
        description: &str,
    ) -> Result<Note, PublishError> {
        let processed = self.process_images(content).await;
        let tags = extract_tags(&processed);

        let trimmed = title.trim();
        let id = if trimmed.is_empty() {
            file_stem.trim().to_string()
        } else {
            trimmed.to_string()
        };
        if id.is_empty() {
            return Err(PublishError::EmptyId);
        }

        let metadata = NoteMetadata {
            title: Some(id.clone()),
            description: Some(description.to_string()),
            author: self.config.author.clone(),
            tags: if tags.is_empty() { None } else { Some(tags) },
            updated: Some(Utc::now()),
        };

        Ok(Note {
            id,
            content: processed,
            metadata: Some(metadata),
        })
    }

    /// Send the published notification on the registered channel, if any.
    pub fn notify_published(&self, id: &str) {
        if let Some(events) = &self.events {
            let _ = events.send(PublishEvent::NotePublished { id: id.to_string() });
        }
    }
}
