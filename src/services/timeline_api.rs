//! Trait and types for reading an account's recent posts.

use crate::error::Result;

/// A single post from the monitored account.
///
/// `created_at` is kept as received (ISO-8601 UTC) so a malformed value can
/// still be shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub text: String,
    pub created_at: String,
}

impl Post {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            created_at: created_at.into(),
        }
    }
}

/// Abstraction over the timeline provider.
#[async_trait::async_trait]
pub trait Timeline: Send + Sync {
    /// Returns the most recent posts, newest first.
    async fn recent_posts(&self) -> Result<Vec<Post>>;
}
