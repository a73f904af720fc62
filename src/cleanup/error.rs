// ABOUTME: Cleanup error types with SNAFU pattern.
// ABOUTME: Cleanup errors become warnings and never reach the run result.

use snafu::Snafu;
use std::path::PathBuf;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CleanupError {
    #[snafu(display("local image store unavailable: {source}"))]
    Connect { source: bollard::errors::Error },

    #[snafu(display("failed to remove local image {image}: {source}"))]
    RemoveImage {
        image: String,
        source: bollard::errors::Error,
    },

    #[snafu(display("failed to remove work directory {}: {source}", path.display()))]
    RemoveWorkdir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupErrorKind {
    Image,
    Workdir,
}

impl CleanupError {
    pub fn kind(&self) -> CleanupErrorKind {
        match self {
            CleanupError::Connect { .. } | CleanupError::RemoveImage { .. } => {
                CleanupErrorKind::Image
            }
            CleanupError::RemoveWorkdir { .. } => CleanupErrorKind::Workdir,
        }
    }
}
