// ABOUTME: Rollout monitor: the single blocking wait of a run.
// ABOUTME: Bounded by the context's rollout timeout even if the adapter never returns.

use crate::cluster::{ClusterError, RolloutOps};
use crate::context::DeploymentContext;

use super::error::DeployError;

/// Block until the workload converges or the rollout timeout elapses.
///
/// No retry happens here; a timed-out rollout is the caller's to redeploy.
pub async fn await_convergence<R: RolloutOps>(
    context: &DeploymentContext,
    cluster: &R,
) -> Result<(), DeployError> {
    let timeout = context.rollout_timeout();

    let waited = tokio::time::timeout(
        timeout,
        cluster.await_rollout(context.workload(), context.namespace(), timeout),
    )
    .await;

    match waited {
        Ok(Ok(())) => Ok(()),
        Ok(Err(ClusterError::Timeout(_))) | Err(_) => Err(DeployError::RolloutTimeout { timeout }),
        Ok(Err(source)) => Err(DeployError::RolloutFailed { source }),
    }
}
