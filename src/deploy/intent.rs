// ABOUTME: The create-or-update decision for a run.
// ABOUTME: Resolved once from a single existence check and never re-evaluated.

use serde::Serialize;
use std::fmt;

/// Which reconcile path a run takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// The workload does not exist: create it and expose an endpoint.
    Create,
    /// The workload exists: set its image and replica count.
    Update,
}

impl Intent {
    pub fn from_existence(exists: bool) -> Self {
        if exists { Intent::Update } else { Intent::Create }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::Create => write!(f, "create"),
            Intent::Update => write!(f, "update"),
        }
    }
}
