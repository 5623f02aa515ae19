//! Error types module
//!
//! Per-image resolution and upload failures are recovered inside the pipeline
//! and never surface as errors; API transmission and file I/O failures are
//! reported with context at the client/CLI boundary. What remains here is the
//! one failure the pipeline itself can hit.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Note id must not be empty")]
    EmptyId,
}
