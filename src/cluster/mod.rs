// ABOUTME: Cluster adapter boundary: capability traits plus the Kubernetes implementation.
// ABOUTME: Deployment logic depends only on the traits so it can run against fakes.

mod error;
mod kubernetes;
pub mod traits;

pub use error::ClusterError;
pub use kubernetes::{DEFAULT_POLL_INTERVAL, KubeCluster};
pub use traits::{
    ClusterOps, RolloutOps, RolloutProgress, RolloutSnapshot, WorkloadMutation, WorkloadQuery,
    WorkloadState,
};
