// ABOUTME: Create-versus-update reconciliation of the target workload.
// ABOUTME: Issues exactly one create path or one update path per run.

use crate::cluster::{ClusterError, WorkloadMutation, WorkloadQuery};
use crate::context::DeploymentContext;
use crate::diagnostics::{Diagnostics, Warning};

use super::error::{ClusterResultExt, DeployError, MutationKind, QueryKind};
use super::intent::Intent;

/// Decide the reconcile path with a single existence check.
pub async fn decide<Q: WorkloadQuery>(
    context: &DeploymentContext,
    cluster: &Q,
) -> Result<Intent, DeployError> {
    let exists = cluster
        .workload_exists(context.workload(), context.namespace())
        .await
        .context_query(QueryKind::Exists)?;

    let intent = Intent::from_existence(exists);
    tracing::info!(
        workload = %context.workload(),
        namespace = %context.namespace(),
        %intent,
        "Reconcile path decided"
    );
    Ok(intent)
}

/// Apply the mutations for `intent`.
///
/// # Errors
///
/// Returns `DeployError::MutationFailed` if the create, or the combined
/// image-and-scale update, is rejected. Endpoint exposure failures are
/// recorded in `diag` and never returned.
pub async fn apply<M: WorkloadMutation>(
    context: &DeploymentContext,
    cluster: &M,
    intent: Intent,
    diag: &mut Diagnostics,
) -> Result<(), DeployError> {
    match intent {
        Intent::Create => create(context, cluster, diag).await,
        Intent::Update => update(context, cluster).await,
    }
}

async fn create<M: WorkloadMutation>(
    context: &DeploymentContext,
    cluster: &M,
    diag: &mut Diagnostics,
) -> Result<(), DeployError> {
    cluster
        .create_workload(
            context.workload(),
            context.namespace(),
            context.image(),
            context.replicas(),
        )
        .await
        .context_mutation(MutationKind::Create)?;

    // The workload may be headless, or a service may already front it
    if let Err(e) = cluster
        .expose_endpoint(context.workload(), context.namespace(), context.port())
        .await
    {
        diag.warn(Warning::expose_failure(format!(
            "failed to expose {} on port {}: {}",
            context.workload(),
            context.port(),
            e
        )));
    }

    Ok(())
}

/// Image and scale are one logical step: on a transient failure of either
/// call, both are reissued together.
async fn update<M: WorkloadMutation>(
    context: &DeploymentContext,
    cluster: &M,
) -> Result<(), DeployError> {
    let policy = context.update_retry();
    let mut attempt = 1;

    loop {
        match update_once(context, cluster).await {
            Ok(()) => return Ok(()),
            Err((operation, e)) if e.is_transient() && attempt < policy.attempts.get() => {
                tracing::warn!(
                    workload = %context.workload(),
                    "{} failed on attempt {}/{}, retrying update: {}",
                    operation,
                    attempt,
                    policy.attempts,
                    e
                );
                tokio::time::sleep(policy.backoff).await;
                attempt += 1;
            }
            Err((operation, source)) => {
                return Err(DeployError::MutationFailed { operation, source });
            }
        }
    }
}

async fn update_once<M: WorkloadMutation>(
    context: &DeploymentContext,
    cluster: &M,
) -> Result<(), (MutationKind, ClusterError)> {
    cluster
        .update_image(context.workload(), context.namespace(), context.image())
        .await
        .map_err(|e| (MutationKind::UpdateImage, e))?;

    cluster
        .scale(context.workload(), context.namespace(), context.replicas())
        .await
        .map_err(|e| (MutationKind::Scale, e))?;

    Ok(())
}
