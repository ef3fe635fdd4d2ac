//! Transient storage for uploaded files.
//!
//! An uploaded image lives in the artifact store only between receipt and
//! the inference call; the orchestrator removes it on every exit path.
//! Stored names are `<uuid>-<sanitized original filename>` so concurrent
//! uploads of the same file never collide.

use std::io;
use std::path::{Path, PathBuf};

/// Filesystem-backed store for in-flight uploads.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

/// Handle to a file persisted by [`ArtifactStore::save`].
#[derive(Debug, Clone)]
pub struct StoredArtifact {
    /// Absolute or root-relative path of the stored file.
    pub path: PathBuf,
}

impl ArtifactStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// the first [`save`](Self::save).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist `bytes` under a unique name derived from `filename`.
    pub async fn save(&self, filename: &str, bytes: &[u8]) -> io::Result<StoredArtifact> {
        tokio::fs::create_dir_all(&self.root).await?;

        let stored_name = format!("{}-{}", uuid::Uuid::new_v4(), sanitize_filename(filename));
        let path = self.root.join(stored_name);
        tokio::fs::write(&path, bytes).await?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "Stored upload artifact");
        Ok(StoredArtifact { path })
    }

    /// Remove a previously stored artifact. Removing a file that is already
    /// gone is not an error, so cleanup can run on every exit path.
    pub async fn remove(&self, artifact: &StoredArtifact) -> io::Result<()> {
        match tokio::fs::remove_file(&artifact.path).await {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

/// Keep alphanumerics, dots, dashes and underscores; replace the rest.
/// Strips any path components an uploader might smuggle into the filename.
fn sanitize_filename(filename: &str) -> String {
    let cleaned: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}
