//! Artifact storage
//!
//! The store persists one rendered artifact per edition key and, in a
//! separate step, synchronizes everything persisted so far to a
//! destination. [`FsStore`] keeps artifacts as `<dist_dir>/<key>.html` and
//! mirrors the distribution directory into a sync target directory.

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

/// Persists rendered artifacts and synchronizes them to a destination
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Persist one rendered artifact under `key`, replacing any previous
    /// artifact with the same key.
    ///
    /// # Errors
    /// Returns [`Error::StoreWrite`] if the artifact cannot be persisted.
    async fn write_dist_file(&self, key: &str, html: &str) -> Result<()>;

    /// Synchronize all persisted artifacts to the destination target.
    ///
    /// Called exactly once per run, after every write has completed.
    ///
    /// # Errors
    /// Returns [`Error::StoreSync`] on failure.
    async fn sync_dist_files(&self) -> Result<()>;
}

/// Filesystem-backed artifact store
pub struct FsStore {
    dist_dir: PathBuf,
    sync_dir: Option<PathBuf>,
}

impl FsStore {
    /// Create a store writing into `dist_dir`, mirroring to `sync_dir`
    /// during the sync phase. With no sync directory, sync is a no-op.
    pub fn new(dist_dir: impl Into<PathBuf>, sync_dir: Option<PathBuf>) -> Self {
        Self {
            dist_dir: dist_dir.into(),
            sync_dir,
        }
    }

    fn artifact_path(&self, key: &str) -> PathBuf {
        self.dist_dir.join(format!("{}.html", key))
    }
}

#[async_trait]
impl ArtifactStore for FsStore {
    async fn write_dist_file(&self, key: &str, html: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.dist_dir)
            .await
            .map_err(|e| Error::StoreWrite {
                key: key.to_string(),
                reason: format!("failed to create {}: {}", self.dist_dir.display(), e),
            })?;

        let path = self.artifact_path(key);
        tokio::fs::write(&path, html)
            .await
            .map_err(|e| Error::StoreWrite {
                key: key.to_string(),
                reason: format!("failed to write {}: {}", path.display(), e),
            })?;

        debug!(key = %key, path = %path.display(), "wrote artifact");
        Ok(())
    }

    async fn sync_dist_files(&self) -> Result<()> {
        let Some(sync_dir) = &self.sync_dir else {
            debug!("no sync target configured, skipping sync");
            return Ok(());
        };

        tokio::fs::create_dir_all(sync_dir)
            .await
            .map_err(|e| Error::StoreSync(format!("failed to create {}: {}", sync_dir.display(), e)))?;

        let mut entries = tokio::fs::read_dir(&self.dist_dir)
            .await
            .map_err(|e| Error::StoreSync(format!("failed to read {}: {}", self.dist_dir.display(), e)))?;

        let mut copied = 0usize;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| Error::StoreSync(e.to_string()))?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| Error::StoreSync(e.to_string()))?;
            if !file_type.is_file() {
                continue;
            }

            let target = sync_dir.join(entry.file_name());
            tokio::fs::copy(entry.path(), &target)
                .await
                .map_err(|e| {
                    Error::StoreSync(format!("failed to copy to {}: {}", target.display(), e))
                })?;
            copied += 1;
        }

        debug!(target = %sync_dir.display(), copied, "synchronized dist files");
        Ok(())
    }
}
