// ABOUTME: Promotion orchestration using the type state pattern.
// ABOUTME: Exports run states, stage functions, and the full promotion driver.

mod deployment;
mod error;
mod intent;
mod monitor;
mod pipeline;
mod reconciler;
mod state;
mod transitions;
mod verify;

pub use deployment::Deployment;
pub use error::{ClusterResultExt, DeployError, DeployErrorKind, MutationKind, QueryKind};
pub use intent::Intent;
pub use monitor::await_convergence;
pub use pipeline::promote;
pub use reconciler::{apply, decide};
pub use state::{Applied, Converged, Decided, RunState, Verified};
pub use verify::{check_replicas, verify_replicas};
