//! Persistence for the dedup marker.
//!
//! [`MarkerStore`] is the narrow read/write interface the run logic depends on.
//! [`FileMarkerStore`] keeps the marker in a single plain-text file.

mod file;

pub use file::FileMarkerStore;

use crate::error::Result;

/// Holds the id of the newest post a previous run already evaluated.
///
/// There is exactly one marker; it is not keyed by account or line.
#[async_trait::async_trait]
pub trait MarkerStore: Send + Sync {
    /// Returns `None` when no marker has been written yet.
    async fn read(&self) -> Result<Option<String>>;

    /// Replaces the stored marker.
    async fn write(&self, id: &str) -> Result<()>;
}
