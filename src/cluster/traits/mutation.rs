// ABOUTME: Workload mutations: create, expose, update image, and scale.
// ABOUTME: Each call is a single round trip to the cluster API.

use crate::cluster::ClusterError;
use crate::types::{ImageRef, Namespace, WorkloadName};
use async_trait::async_trait;
use std::num::NonZeroU32;

/// Cluster mutations used by the reconciler.
#[async_trait]
pub trait WorkloadMutation: Send + Sync {
    /// Create a deployment running `image` with `replicas` pods.
    async fn create_workload(
        &self,
        name: &WorkloadName,
        namespace: &Namespace,
        image: &ImageRef,
        replicas: NonZeroU32,
    ) -> Result<(), ClusterError>;

    /// Create a ClusterIP endpoint in front of the workload on `port`.
    async fn expose_endpoint(
        &self,
        name: &WorkloadName,
        namespace: &Namespace,
        port: u16,
    ) -> Result<(), ClusterError>;

    /// Point the workload's container at `image`.
    async fn update_image(
        &self,
        name: &WorkloadName,
        namespace: &Namespace,
        image: &ImageRef,
    ) -> Result<(), ClusterError>;

    /// Set the workload's replica count.
    async fn scale(
        &self,
        name: &WorkloadName,
        namespace: &Namespace,
        replicas: NonZeroU32,
    ) -> Result<(), ClusterError>;
}
