//! Notepress Publisher Library
//!
//! The content-publishing pipeline: extract embedded image references from a
//! document, resolve and upload each referenced attachment, rewrite the text
//! to point at uploaded URLs, extract hashtags, and assemble the publishable
//! artifact. Per-image failures are logged and skipped; only the final API
//! transmission can fail a publish.

pub mod events;
pub mod pipeline;

// Re-export commonly used types
pub use events::{PublishEvent, PublishEventSender};
pub use pipeline::ContentPublisher;
