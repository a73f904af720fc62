// ABOUTME: Verification gate comparing running pods against desired replicas.
// ABOUTME: A single point-in-time sample; over-provisioning is not an error.

use crate::cluster::WorkloadQuery;
use crate::context::DeploymentContext;

use super::error::{ClusterResultExt, DeployError, QueryKind};

/// Sample the running pod count once and fail on a shortfall.
///
/// Returns the observed count on success.
pub async fn verify_replicas<Q: WorkloadQuery>(
    context: &DeploymentContext,
    cluster: &Q,
) -> Result<u32, DeployError> {
    let observed = cluster
        .count_running_pods(context.workload(), context.namespace())
        .await
        .context_query(QueryKind::CountRunningPods)?;

    check_replicas(context.replicas().get(), observed)?;
    Ok(observed)
}

/// Fail if fewer than `desired` pods are running.
pub fn check_replicas(desired: u32, observed: u32) -> Result<(), DeployError> {
    if observed < desired {
        return Err(DeployError::ReplicaShortfall { desired, observed });
    }
    Ok(())
}
