//! Notepress Core Library
//!
//! This crate provides the domain models, configuration snapshot, error types,
//! and pure text helpers shared across all notepress components.

pub mod config;
pub mod error;
pub mod models;
pub mod text;

// Re-export commonly used types
pub use config::PublishConfig;
pub use error::PublishError;
pub use models::{ImageReference, Note, NoteMetadata};
