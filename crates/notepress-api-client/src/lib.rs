//! HTTP client for the notepress publish API.
//!
//! Thin wrapper over reqwest with X-API-Key auth: list, fetch, publish, and
//! delete published notes. Non-success responses surface as errors with the
//! response body attached; there are no automatic retries anywhere.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use notepress_core::{Note, PublishConfig};
use reqwest::Client;

/// HTTP client for the publish API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ApiClient {
    pub fn new(base_url: String, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Create a client from a configuration snapshot.
    pub fn from_config(config: &PublishConfig) -> Result<Self> {
        Self::new(config.api_url.clone(), config.api_key.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// List every published note, most recently updated first.
    pub async fn list_notes(&self) -> Result<Vec<Note>> {
        let response = self
            .client
            .get(self.build_url("/notes"))
            .header("Content-Type", "application/json")
            .send()
            .await
            .context("Failed to fetch notes")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "Failed to fetch notes: {}: {}",
                status,
                error_text
            ));
        }

        let mut notes: Vec<Note> = response
            .json()
            .await
            .context("Failed to parse notes response as JSON")?;

        sort_by_updated_desc(&mut notes);
        Ok(notes)
    }

    /// Fetch a single published note by id.
    pub async fn fetch_note(&self, note_id: &str) -> Result<Note> {
        let response = self
            .client
            .get(self.build_url(&format!("/note/{}", urlencoding::encode(note_id))))
            .header("Content-Type", "application/json")
            .send()
            .await
            .with_context(|| format!("Failed to fetch note {}", note_id))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "Failed to fetch note {}: {}: {}",
                note_id,
                status,
                error_text
            ));
        }

        response
            .json()
            .await
            .context("Failed to parse note response as JSON")
    }

    /// Publish a note. A note with an existing id overwrites the prior one.
    pub async fn publish_note(&self, note: &Note) -> Result<()> {
        let response = self
            .client
            .post(self.build_url("/publish"))
            .header("Content-Type", "application/json")
            .header("X-API-Key", &self.api_key)
            .json(note)
            .send()
            .await
            .context("Failed to publish note")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "Failed to publish note: {}: {}",
                status,
                error_text
            ));
        }

        Ok(())
    }

    /// Unpublish (delete) a note by id.
    pub async fn delete_note(&self, note_id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.build_url(&format!("/note/{}", urlencoding::encode(note_id))))
            .header("Content-Type", "application/json")
            .header("X-API-Key", &self.api_key)
            .send()
            .await
            .with_context(|| format!("Failed to delete note {}", note_id))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "Failed to delete note {}: {}: {}",
                note_id,
                status,
                error_text
            ));
        }

        Ok(())
    }
}

fn updated_at(note: &Note) -> Option<DateTime<Utc>> {
    note.metadata.as_ref().and_then(|m| m.updated)
}

/// Sort notes by their `updated` timestamp, newest first. Notes without a
/// timestamp sort last.
pub fn sort_by_updated_desc(notes: &mut [Note]) {
    notes.sort_by(|a, b| updated_at(b).cmp(&updated_at(a)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use notepress_core::NoteMetadata;

    fn note(id: &str, updated: Option<DateTime<Utc>>) -> Note {
        Note {
            id: id.to_string(),
            content: String::new(),
            metadata: updated.map(|updated| NoteMetadata {
                updated: Some(updated),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn sorts_newest_first_with_missing_timestamps_last() {
        let old = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let new = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();

        let mut notes = vec![note("old", Some(old)), note("none", None), note("new", Some(new))];
        sort_by_updated_desc(&mut notes);

        let ids: Vec<_> = notes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old", "none"]);
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:8080/".to_string(), "key".to_string())
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.build_url("/notes"), "http://localhost:8080/notes");
    }

    #[test]
    fn note_ids_are_url_encoded_in_paths() {
        let client = ApiClient::new("http://localhost:8080".to_string(), "key".to_string())
            .unwrap();
        assert_eq!(
            client.build_url(&format!("/note/{}", urlencoding::encode("My Note"))),
            "http://localhost:8080/note/My%20Note"
        );
    }
}
