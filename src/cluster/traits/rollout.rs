// ABOUTME: Blocking wait for a workload rollout to converge.
// ABOUTME: The only operation in a run that suspends for longer than one round trip.

use crate::cluster::ClusterError;
use crate::types::{Namespace, WorkloadName};
use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait RolloutOps: Send + Sync {
    /// Wait until every replica runs the current revision and no stale
    /// replicas remain.
    ///
    /// # Errors
    ///
    /// `ClusterError::Timeout` if convergence is not observed within
    /// `timeout`, `ClusterError::RolloutStalled` if the cluster reports the
    /// rollout can no longer make progress.
    async fn await_rollout(
        &self,
        name: &WorkloadName,
        namespace: &Namespace,
        timeout: Duration,
    ) -> Result<(), ClusterError>;
}
