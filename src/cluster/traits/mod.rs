// ABOUTME: Composable capability traits for cluster adapters.
// ABOUTME: Defines WorkloadQuery, WorkloadMutation, RolloutOps, and the ClusterOps bundle.

mod mutation;
mod query;
mod rollout;
mod shared_types;

pub use mutation::WorkloadMutation;
pub use query::WorkloadQuery;
pub use rollout::RolloutOps;
pub use shared_types::*;

/// Every capability a promotion run needs.
pub trait ClusterOps: WorkloadQuery + WorkloadMutation + RolloutOps {}

impl<T: WorkloadQuery + WorkloadMutation + RolloutOps> ClusterOps for T {}
