// ABOUTME: Run state types for the type state pattern.
// ABOUTME: Each state carries only the data that exists once it is reached.

use super::intent::Intent;

/// The create-or-update decision has been made.
/// Available actions: `apply()`
#[derive(Debug, Clone, Copy)]
pub struct Decided {
    pub(crate) intent: Intent,
}

/// Mutations accepted by the cluster.
/// Available actions: `await_convergence()`
#[derive(Debug, Clone, Copy)]
pub struct Applied {
    pub(crate) intent: Intent,
}

/// Rollout converged within the timeout.
/// Available actions: `verify()`
#[derive(Debug, Clone, Copy)]
pub struct Converged {
    pub(crate) intent: Intent,
}

/// At least the desired number of pods were observed running.
#[derive(Debug, Clone, Copy)]
pub struct Verified {
    pub(crate) intent: Intent,
    pub(crate) observed_replicas: u32,
}

/// Every state knows which reconcile path produced it.
pub trait RunState {
    fn intent(&self) -> Intent;
}

macro_rules! impl_run_state {
    ($($state:ty),*) => {
        $(impl RunState for $state {
            fn intent(&self) -> Intent {
                self.intent
            }
        })*
    };
}

impl_run_state!(Decided, Applied, Converged, Verified);
