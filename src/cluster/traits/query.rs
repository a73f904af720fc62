// ABOUTME: Read-only workload lookups against the cluster.
// ABOUTME: Existence check, running pod count, and a state snapshot for status output.

use super::shared_types::WorkloadState;
use crate::cluster::ClusterError;
use crate::types::{Namespace, WorkloadName};
use async_trait::async_trait;

/// Read-only queries. None of these mutate cluster state.
#[async_trait]
pub trait WorkloadQuery: Send + Sync {
    /// Whether a deployment named `name` exists in `namespace`.
    async fn workload_exists(
        &self,
        name: &WorkloadName,
        namespace: &Namespace,
    ) -> Result<bool, ClusterError>;

    /// Number of pods selected by the workload whose phase is `Running`.
    async fn count_running_pods(
        &self,
        name: &WorkloadName,
        namespace: &Namespace,
    ) -> Result<u32, ClusterError>;

    /// Current observed state, or `None` if the workload does not exist.
    async fn describe(
        &self,
        name: &WorkloadName,
        namespace: &Namespace,
    ) -> Result<Option<WorkloadState>, ClusterError>;
}
