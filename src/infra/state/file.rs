use std::io::ErrorKind;
use std::path::PathBuf;

use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::MarkerStore;
use crate::error::Result;

/// Stores the marker as the trimmed contents of a text file.
///
/// Writes go to a sibling `.tmp` file which is then renamed over the target,
/// so a reader never sees a half-written id. Concurrent runs are not guarded.
pub struct FileMarkerStore {
    path: PathBuf,
}

impl FileMarkerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl MarkerStore for FileMarkerStore {
    async fn read(&self) -> Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                let id = content.trim();
                Ok((!id.is_empty()).then(|| id.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No marker file yet");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, id: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(id.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!(path = %self.path.display(), id, "Marker written");
        Ok(())
    }
}
