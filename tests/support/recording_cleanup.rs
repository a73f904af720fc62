// ABOUTME: Cleanup step that counts how often it runs.
// ABOUTME: Used to check teardown happens exactly once on every exit path.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use kubeship::cleanup::{CleanupError, CleanupStep};

#[derive(Debug, Clone, Default)]
pub struct RecordingCleanup {
    runs: Arc<AtomicUsize>,
    fail: bool,
}

impl RecordingCleanup {
    pub fn new() -> Self {
        Self::default()
    }

    /// A step that records its run and then fails.
    pub fn failing() -> Self {
        Self {
            runs: Arc::default(),
            fail: true,
        }
    }

    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CleanupStep for RecordingCleanup {
    fn name(&self) -> &str {
        "recording"
    }

    async fn run(&self) -> Result<(), CleanupError> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(CleanupError::RemoveWorkdir {
                path: PathBuf::from("/tmp/kubeship-build"),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            });
        }
        Ok(())
    }
}
