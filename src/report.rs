// ABOUTME: Structured record of a finished promotion run.
// ABOUTME: Serialized for --json output and rendered as text otherwise.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::context::{DeploymentContext, RunMetadata};
use crate::deploy::{DeployError, DeployErrorKind, Intent};
use crate::diagnostics::Warning;

/// Terminal state of a run. There is no partial success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RunStatus {
    Succeeded,
    Failed {
        kind: DeployErrorKind,
        reason: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub workload: String,
    pub namespace: String,
    pub image: String,
    pub replicas: u32,
    pub metadata: RunMetadata,
    /// Absent when the run failed before the reconcile path was decided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    pub status: RunStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_replicas: Option<u32>,
    pub warnings: Vec<Warning>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    pub fn new(
        context: &DeploymentContext,
        intent: Option<Intent>,
        result: Result<u32, DeployError>,
        warnings: Vec<Warning>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let (status, observed_replicas) = match result {
            Ok(observed) => (RunStatus::Succeeded, Some(observed)),
            Err(e) => {
                let observed = match &e {
                    DeployError::ReplicaShortfall { observed, .. } => Some(*observed),
                    _ => None,
                };
                (
                    RunStatus::Failed {
                        kind: e.kind(),
                        reason: e.to_string(),
                    },
                    observed,
                )
            }
        };

        Self {
            workload: context.workload().to_string(),
            namespace: context.namespace().to_string(),
            image: context.image().to_string(),
            replicas: context.replicas().get(),
            metadata: context.metadata().clone(),
            intent,
            status,
            observed_replicas,
            warnings,
            started_at,
            finished_at,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.status == RunStatus::Succeeded
    }

    /// The failure reason, if the run failed.
    pub fn reason(&self) -> Option<&str> {
        match &self.status {
            RunStatus::Succeeded => None,
            RunStatus::Failed { reason, .. } => Some(reason),
        }
    }

    pub fn duration_secs(&self) -> f64 {
        (self.finished_at - self.started_at)
            .to_std()
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0)
    }

    /// One-line human summary.
    pub fn summary(&self) -> String {
        match &self.status {
            RunStatus::Succeeded => format!(
                "Promoted {} to {}/{} ({} of {} replicas running)",
                self.image,
                self.namespace,
                self.workload,
                self.observed_replicas.unwrap_or(self.replicas),
                self.replicas
            ),
            RunStatus::Failed { reason, .. } => format!(
                "Promotion of {} to {}/{} failed: {}",
                self.image, self.namespace, self.workload, reason
            ),
        }
    }
}
