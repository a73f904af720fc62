// ABOUTME: Types shared by the cluster adapter traits.
// ABOUTME: Observed workload state and the rollout convergence rules.

use serde::Serialize;

/// Label carrying the workload name on every object kubeship creates.
pub const NAME_LABEL: &str = "app.kubernetes.io/name";

/// Label marking objects created by kubeship.
pub const MANAGED_BY_LABEL: &str = "app.kubernetes.io/managed-by";

/// Value of [`MANAGED_BY_LABEL`].
pub const MANAGED_BY: &str = "kubeship";

/// Observed state of a workload. Owned by the cluster, not by kubeship.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkloadState {
    /// Image of the workload's primary container.
    pub image: Option<String>,
    /// Desired replica count recorded on the workload.
    pub replicas: i32,
    pub updated_replicas: i32,
    pub ready_replicas: i32,
    pub available_replicas: i32,
}

/// The counters rollout convergence is judged on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RolloutSnapshot {
    /// `metadata.generation` of the workload.
    pub generation: i64,
    /// Generation the controller has acted on.
    pub observed_generation: i64,
    /// Desired replicas from the workload spec.
    pub desired: i32,
    /// Replicas running the current revision.
    pub updated: i32,
    /// All replicas, current and stale.
    pub total: i32,
    /// Current-revision replicas that are available.
    pub available: i32,
    /// The controller gave up making progress.
    pub deadline_exceeded: bool,
}

/// Where a rollout stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RolloutProgress {
    Converged,
    Progressing(String),
    Stalled(String),
}

impl RolloutSnapshot {
    /// Apply the convergence rules: spec observed, every replica updated,
    /// no stale replicas left, every updated replica available.
    pub fn progress(&self) -> RolloutProgress {
        if self.deadline_exceeded {
            return RolloutProgress::Stalled("progress deadline exceeded".to_string());
        }

        if self.observed_generation < self.generation {
            return RolloutProgress::Progressing(
                "waiting for the new spec to be observed".to_string(),
            );
        }

        if self.updated < self.desired {
            return RolloutProgress::Progressing(format!(
                "{} of {} replicas updated",
                self.updated, self.desired
            ));
        }

        if self.total > self.updated {
            return RolloutProgress::Progressing(format!(
                "{} old replicas pending termination",
                self.total - self.updated
            ));
        }

        if self.available < self.updated {
            return RolloutProgress::Progressing(format!(
                "{} of {} updated replicas available",
                self.available, self.updated
            ));
        }

        RolloutProgress::Converged
    }
}
