// ABOUTME: Generic run struct parameterized by state.
// ABOUTME: Stages can only be entered in order; the compiler rejects skipped steps.

use crate::context::DeploymentContext;

use super::intent::Intent;
use super::state::{RunState, Verified};

/// A promotion run in progress, parameterized by its current state.
///
/// Transition methods consume the value, so a run that failed a stage
/// cannot be driven further.
#[derive(Debug)]
pub struct Deployment<S> {
    pub(crate) context: DeploymentContext,
    pub(crate) state: S,
}

impl<S: RunState> Deployment<S> {
    pub fn context(&self) -> &DeploymentContext {
        &self.context
    }

    pub fn intent(&self) -> Intent {
        self.state.intent()
    }
}

impl Deployment<Verified> {
    /// Running pod count sampled by the verification gate.
    pub fn observed_replicas(&self) -> u32 {
        self.state.observed_replicas
    }
}
