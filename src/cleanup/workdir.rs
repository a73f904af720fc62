// ABOUTME: Removes the transient build work directory.
// ABOUTME: A directory that is already gone counts as removed.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::error::CleanupError;
use super::step::CleanupStep;

#[derive(Debug, Clone)]
pub struct WorkdirCleanup {
    path: PathBuf,
}

impl WorkdirCleanup {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CleanupStep for WorkdirCleanup {
    fn name(&self) -> &str {
        "work directory"
    }

    async fn run(&self) -> Result<(), CleanupError> {
        match tokio::fs::remove_dir_all(&self.path).await {
            Ok(()) => {
                tracing::debug!("Removed work directory {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(CleanupError::RemoveWorkdir {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
