// ABOUTME: State transition methods for promotion runs.
// ABOUTME: Each method consumes self and returns the next state on success.

use crate::cluster::{RolloutOps, WorkloadMutation, WorkloadQuery};
use crate::context::DeploymentContext;
use crate::diagnostics::Diagnostics;

use super::Deployment;
use super::error::DeployError;
use super::state::{Applied, Converged, Decided, Verified};
use super::{monitor, reconciler, verify};

// =============================================================================
// Start -> Decided
// =============================================================================

impl Deployment<Decided> {
    /// Query the cluster once and fix the reconcile path for this run.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::QueryFailed` if the existence check fails.
    pub async fn decide<Q: WorkloadQuery>(
        context: DeploymentContext,
        cluster: &Q,
    ) -> Result<Self, DeployError> {
        let intent = reconciler::decide(&context, cluster).await?;
        Ok(Deployment {
            context,
            state: Decided { intent },
        })
    }

    // =========================================================================
    // Decided -> Applied
    // =========================================================================

    /// Issue the mutations for the decided path.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::MutationFailed` if the cluster rejects the create
    /// or the image-and-scale update.
    pub async fn apply<M: WorkloadMutation>(
        self,
        cluster: &M,
        diag: &mut Diagnostics,
    ) -> Result<Deployment<Applied>, DeployError> {
        let intent = self.state.intent;
        reconciler::apply(&self.context, cluster, intent, diag).await?;
        tracing::info!(workload = %self.context.workload(), %intent, "Mutations applied");

        Ok(Deployment {
            context: self.context,
            state: Applied { intent },
        })
    }
}

// =============================================================================
// Applied -> Converged
// =============================================================================

impl Deployment<Applied> {
    /// Wait for the rollout to converge.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::RolloutTimeout` if convergence is not observed in
    /// time, or `DeployError::RolloutFailed` if the wait ends otherwise.
    pub async fn await_convergence<R: RolloutOps>(
        self,
        cluster: &R,
    ) -> Result<Deployment<Converged>, DeployError> {
        monitor::await_convergence(&self.context, cluster).await?;
        tracing::info!(workload = %self.context.workload(), "Rollout converged");

        Ok(Deployment {
            context: self.context,
            state: Converged {
                intent: self.state.intent,
            },
        })
    }
}

// =============================================================================
// Converged -> Verified
// =============================================================================

impl Deployment<Converged> {
    /// Confirm at least the desired number of pods are running.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::ReplicaShortfall` if fewer pods are running, or
    /// `DeployError::QueryFailed` if the pod count cannot be read.
    pub async fn verify<Q: WorkloadQuery>(
        self,
        cluster: &Q,
    ) -> Result<Deployment<Verified>, DeployError> {
        let observed_replicas = verify::verify_replicas(&self.context, cluster).await?;
        tracing::info!(
            workload = %self.context.workload(),
            observed_replicas,
            desired = self.context.replicas().get(),
            "Replica count verified"
        );

        Ok(Deployment {
            context: self.context,
            state: Verified {
                intent: self.state.intent,
                observed_replicas,
            },
        })
    }
}
