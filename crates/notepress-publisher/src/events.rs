//! Publish notifications.
//!
//! Views that display published notes register an explicit channel with the
//! publisher at construction time and refresh when an event arrives. The
//! channel's lifetime is scoped to the views that need it; there is no
//! process-wide event bus.

use tokio::sync::mpsc;

/// Notification emitted after a note is successfully transmitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishEvent {
    NotePublished { id: String },
}

/// Sending half of a publish notification channel.
pub type PublishEventSender = mpsc::UnboundedSender<PublishEvent>;
