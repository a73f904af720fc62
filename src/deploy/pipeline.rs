// ABOUTME: Drives a full promotion run from decision to verification.
// ABOUTME: Cleanup runs exactly once on every exit path, including panics.

use chrono::Utc;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;

use crate::cleanup::CleanupHandler;
use crate::cluster::ClusterOps;
use crate::context::DeploymentContext;
use crate::diagnostics::Diagnostics;
use crate::output::Output;
use crate::report::RunReport;

use super::Deployment;
use super::error::DeployError;
use super::intent::Intent;

/// Promote the context's image to its workload and report the outcome.
///
/// Stages run strictly in order and the first fatal error ends the chain.
/// `cleanup` always runs afterwards; a panic in any stage is re-raised only
/// once cleanup has finished.
pub async fn promote<C: ClusterOps>(
    context: &DeploymentContext,
    cluster: &C,
    cleanup: CleanupHandler,
    output: &Output,
) -> RunReport {
    let started_at = Utc::now();
    let mut diag = Diagnostics::default();
    let mut intent = None;

    let chain = AssertUnwindSafe(drive(context, cluster, &mut diag, &mut intent, output))
        .catch_unwind()
        .await;

    output.progress("  → Cleaning up...");
    cleanup.run(&mut diag).await;

    let result = match chain {
        Ok(result) => result,
        Err(panic) => std::panic::resume_unwind(panic),
    };

    if let Err(ref e) = result {
        tracing::error!(workload = %context.workload(), kind = ?e.kind(), "Promotion failed: {}", e);
    }

    RunReport::new(
        context,
        intent,
        result,
        diag.into_warnings(),
        started_at,
        Utc::now(),
    )
}

async fn drive<C: ClusterOps>(
    context: &DeploymentContext,
    cluster: &C,
    diag: &mut Diagnostics,
    intent: &mut Option<Intent>,
    output: &Output,
) -> Result<u32, DeployError> {
    output.progress(&format!(
        "  → Checking {} in {}...",
        context.workload(),
        context.namespace()
    ));
    let deployment = Deployment::decide(context.clone(), cluster).await?;
    *intent = Some(deployment.intent());

    match deployment.intent() {
        Intent::Create => output.progress(&format!(
            "  → Creating {} with {} replica(s)...",
            context.workload(),
            context.replicas()
        )),
        Intent::Update => output.progress(&format!(
            "  → Updating {} to {} ({} replica(s))...",
            context.workload(),
            context.image(),
            context.replicas()
        )),
    }
    let deployment = deployment.apply(cluster, diag).await?;

    output.progress(&format!(
        "  → Waiting for rollout (timeout {}s)...",
        context.rollout_timeout().as_secs()
    ));
    let deployment = deployment.await_convergence(cluster).await?;

    output.progress("  → Verifying running replicas...");
    let deployment = deployment.verify(cluster).await?;

    Ok(deployment.observed_replicas())
}
