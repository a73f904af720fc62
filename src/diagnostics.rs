// ABOUTME: Diagnostics accumulator for non-fatal warnings during a run.
// ABOUTME: Collects expose and cleanup failures that must never change the run's result.

use serde::Serialize;

/// Collects non-fatal warnings during a promotion run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning.message);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Take ownership of the collected warnings, e.g. for the run report.
    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

/// A non-fatal warning collected during a run.
#[derive(Debug, Clone, Serialize)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// The endpoint for a newly created workload could not be created.
    pub fn expose_failure(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::ExposeFailure,
            message: message.into(),
        }
    }

    /// A local cleanup step failed.
    pub fn cleanup_failure(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::CleanupFailure,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Endpoint creation failed; the workload may be headless or already exposed.
    ExposeFailure,
    /// Best-effort local teardown failed.
    CleanupFailure,
}
