// ABOUTME: Error types for cluster adapter operations.
// ABOUTME: Classifies API failures so callers can tell transient from permanent ones.

use std::time::Duration;

/// Errors reported by a cluster adapter.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClusterError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("conflicting update: {0}")]
    Conflict(String),

    #[error("rollout did not converge within {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("rollout stalled: {0}")]
    RolloutStalled(String),

    #[error("cluster API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),
}

impl ClusterError {
    /// Whether retrying the same request could reasonably succeed.
    ///
    /// Optimistic-concurrency conflicts, throttling, server errors, and
    /// connection failures are transient. Validation and permission errors
    /// are not.
    pub fn is_transient(&self) -> bool {
        match self {
            ClusterError::Conflict(_) | ClusterError::Transport(_) => true,
            ClusterError::Api { status, .. } => *status == 429 || (500..=599).contains(status),
            ClusterError::NotFound(_)
            | ClusterError::AlreadyExists(_)
            | ClusterError::Timeout(_)
            | ClusterError::RolloutStalled(_) => false,
        }
    }
}
