//! Trait and types for push notifications.

use crate::error::Result;

pub const DEFAULT_TAGS: &str = "train";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    /// Comma-separated tags; the receiving client maps them to icons.
    pub tags: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            tags: DEFAULT_TAGS.to_string(),
        }
    }
}

/// What happened to a notification handed to a [`Notifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// No destination is configured.
    Skipped,
}

#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: &Notification) -> Result<Delivery>;
}
