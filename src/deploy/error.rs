// ABOUTME: Error types for promotion runs.
// ABOUTME: Each fatal failure kind carries the parameters needed to report it.

use serde::Serialize;
use std::fmt;
use std::time::Duration;

use crate::cluster::ClusterError;

/// Cluster mutations issued by the reconciler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    Create,
    UpdateImage,
    Scale,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationKind::Create => write!(f, "create"),
            MutationKind::UpdateImage => write!(f, "update image"),
            MutationKind::Scale => write!(f, "scale"),
        }
    }
}

/// Cluster reads whose failure aborts a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    Exists,
    CountRunningPods,
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKind::Exists => write!(f, "existence check"),
            QueryKind::CountRunningPods => write!(f, "running pod count"),
        }
    }
}

/// Fatal errors that end a run as `Failed`.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// Create, image update, or scale rejected by the cluster.
    #[error("{operation} failed: {source}")]
    MutationFailed {
        operation: MutationKind,
        source: ClusterError,
    },

    /// A read needed for a decision failed.
    #[error("{operation} failed: {source}")]
    QueryFailed {
        operation: QueryKind,
        source: ClusterError,
    },

    /// Convergence was not observed within the bound.
    #[error("rollout did not converge within {}s", .timeout.as_secs())]
    RolloutTimeout { timeout: Duration },

    /// The rollout wait ended without convergence for another reason.
    #[error("rollout failed: {source}")]
    RolloutFailed { source: ClusterError },

    /// Fewer pods running than desired after convergence.
    #[error("replica shortfall: {observed} of {desired} desired replicas running")]
    ReplicaShortfall { desired: u32, observed: u32 },
}

/// Error kind for programmatic handling and reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeployErrorKind {
    MutationFailure,
    QueryFailure,
    RolloutTimeout,
    RolloutFailure,
    ReplicaShortfall,
}

impl DeployError {
    pub fn kind(&self) -> DeployErrorKind {
        match self {
            DeployError::MutationFailed { .. } => DeployErrorKind::MutationFailure,
            DeployError::QueryFailed { .. } => DeployErrorKind::QueryFailure,
            DeployError::RolloutTimeout { .. } => DeployErrorKind::RolloutTimeout,
            DeployError::RolloutFailed { .. } => DeployErrorKind::RolloutFailure,
            DeployError::ReplicaShortfall { .. } => DeployErrorKind::ReplicaShortfall,
        }
    }

    /// The underlying cluster error, if any.
    pub fn cluster_error(&self) -> Option<&ClusterError> {
        match self {
            DeployError::MutationFailed { source, .. }
            | DeployError::QueryFailed { source, .. }
            | DeployError::RolloutFailed { source } => Some(source),
            DeployError::RolloutTimeout { .. } | DeployError::ReplicaShortfall { .. } => None,
        }
    }
}

/// Extension trait for attaching deploy context to cluster results.
pub trait ClusterResultExt<T> {
    fn context_mutation(self, operation: MutationKind) -> Result<T, DeployError>;
    fn context_query(self, operation: QueryKind) -> Result<T, DeployError>;
}

impl<T> ClusterResultExt<T> for Result<T, ClusterError> {
    fn context_mutation(self, operation: MutationKind) -> Result<T, DeployError> {
        self.map_err(|source| DeployError::MutationFailed { operation, source })
    }

    fn context_query(self, operation: QueryKind) -> Result<T, DeployError> {
        self.map_err(|source| DeployError::QueryFailed { operation, source })
    }
}
