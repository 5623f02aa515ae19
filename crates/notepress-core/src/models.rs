use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One occurrence of an embedded image reference in a document.
///
/// Created by scanning a document, consumed once per publish operation, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    /// Exact matched substring; used as the replacement key during rewrite.
    pub original_text: String,
    /// Raw path token as written by the author. May omit leading folders.
    pub path: String,
    /// Author-supplied alternate text, if any.
    pub alt: Option<String>,
}

/// Metadata attached to a published note.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Omitted entirely when no tags were extracted, never an empty list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Set at publish time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}

/// The published representation of a document, as sent to the publish API.
///
/// The id is the user-edited title (falling back to the source file stem);
/// publishing a note with an existing id overwrites the prior note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<NoteMetadata>,
}
