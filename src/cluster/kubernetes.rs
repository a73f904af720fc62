// ABOUTME: Kubernetes cluster adapter built on kube-rs.
// ABOUTME: Maps workload operations onto apps/v1 Deployments, v1 Services, and v1 Pods.

use crate::cluster::ClusterError;
use crate::cluster::traits::{
    MANAGED_BY, MANAGED_BY_LABEL, NAME_LABEL, RolloutOps, RolloutProgress, RolloutSnapshot,
    WorkloadMutation, WorkloadQuery, WorkloadState,
};
use crate::types::{ImageRef, Namespace, WorkloadName};
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec};
use k8s_openapi::api::core::v1::{
    Container, Pod, PodSpec, PodTemplateSpec, Service, ServicePort, ServiceSpec,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use kube::Client;
use kube::api::{Api, ListParams, Patch, PatchParams, PostParams};
use serde_json::json;
use std::collections::BTreeMap;
use std::num::NonZeroU32;
use std::time::Duration;

/// Field manager recorded on every write.
const FIELD_MANAGER: &str = "kubeship";

/// Default interval between rollout status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

// =============================================================================
// Error Mapping Helpers
// =============================================================================

fn map_kube_error(e: kube::Error, what: &str) -> ClusterError {
    match e {
        kube::Error::Api(resp) => match resp.code {
            404 => ClusterError::NotFound(format!("{}: {}", what, resp.message)),
            409 if resp.reason == "AlreadyExists" => {
                ClusterError::AlreadyExists(format!("{}: {}", what, resp.message))
            }
            409 => ClusterError::Conflict(format!("{}: {}", what, resp.message)),
            status => ClusterError::Api {
                status,
                message: format!("{}: {}", what, resp.message),
            },
        },
        other => ClusterError::Transport(format!("{}: {}", what, other)),
    }
}

// =============================================================================
// Object Builders
// =============================================================================

fn selector_labels(name: &WorkloadName) -> BTreeMap<String, String> {
    BTreeMap::from([(NAME_LABEL.to_string(), name.to_string())])
}

fn object_labels(name: &WorkloadName) -> BTreeMap<String, String> {
    let mut labels = selector_labels(name);
    labels.insert(MANAGED_BY_LABEL.to_string(), MANAGED_BY.to_string());
    labels
}

/// Deployment with a single container named after the workload.
fn build_deployment(
    name: &WorkloadName,
    namespace: &Namespace,
    image: &ImageRef,
    replicas: NonZeroU32,
) -> Deployment {
    Deployment {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            labels: Some(object_labels(name)),
            ..Default::default()
        },
        spec: Some(DeploymentSpec {
            replicas: Some(replicas_i32(replicas)),
            selector: LabelSelector {
                match_labels: Some(selector_labels(name)),
                ..Default::default()
            },
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(object_labels(name)),
                    ..Default::default()
                }),
                spec: Some(PodSpec {
                    containers: vec![Container {
                        name: name.to_string(),
                        image: Some(image.to_string()),
                        ..Default::default()
                    }],
                    ..Default::default()
                }),
            },
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// ClusterIP service selecting the workload's pods.
fn build_service(name: &WorkloadName, namespace: &Namespace, port: u16) -> Service {
    Service {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            labels: Some(object_labels(name)),
            ..Default::default()
        },
        spec: Some(ServiceSpec {
            type_: Some("ClusterIP".to_string()),
            selector: Some(selector_labels(name)),
            ports: Some(vec![ServicePort {
                port: i32::from(port),
                target_port: Some(IntOrString::Int(i32::from(port))),
                protocol: Some("TCP".to_string()),
                ..Default::default()
            }]),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn write_params() -> PatchParams {
    PatchParams {
        field_manager: Some(FIELD_MANAGER.to_string()),
        ..Default::default()
    }
}

fn replicas_i32(replicas: NonZeroU32) -> i32 {
    i32::try_from(replicas.get()).unwrap_or(i32::MAX)
}

// =============================================================================
// Status Readers
// =============================================================================

fn rollout_snapshot(deployment: &Deployment) -> RolloutSnapshot {
    let status = deployment.status.clone().unwrap_or_default();
    let deadline_exceeded = status.conditions.as_deref().unwrap_or_default().iter().any(|c| {
        c.type_ == "Progressing" && c.reason.as_deref() == Some("ProgressDeadlineExceeded")
    });

    RolloutSnapshot {
        generation: deployment.metadata.generation.unwrap_or(0),
        observed_generation: status.observed_generation.unwrap_or(0),
        desired: deployment
            .spec
            .as_ref()
            .and_then(|s| s.replicas)
            .unwrap_or(1),
        updated: status.updated_replicas.unwrap_or(0),
        total: status.replicas.unwrap_or(0),
        available: status.available_replicas.unwrap_or(0),
        deadline_exceeded,
    }
}

/// Name of the container to retarget: the one named after the workload,
/// else the first one.
fn primary_container<'a>(deployment: &'a Deployment, name: &WorkloadName) -> Option<&'a Container> {
    let containers = &deployment.spec.as_ref()?.template.spec.as_ref()?.containers;
    containers
        .iter()
        .find(|c| c.name == name.as_str())
        .or_else(|| containers.first())
}

fn workload_state(deployment: &Deployment, name: &WorkloadName) -> WorkloadState {
    let status = deployment.status.clone().unwrap_or_default();
    WorkloadState {
        image: primary_container(deployment, name).and_then(|c| c.image.clone()),
        replicas: deployment
            .spec
            .as_ref()
            .and_then(|s| s.replicas)
            .unwrap_or(1),
        updated_replicas: status.updated_replicas.unwrap_or(0),
        ready_replicas: status.ready_replicas.unwrap_or(0),
        available_replicas: status.available_replicas.unwrap_or(0),
    }
}

/// Label selector string (`k=v,k2=v2`) built from the deployment's `matchLabels`.
fn label_selector(deployment: &Deployment) -> Option<String> {
    let labels = deployment.spec.as_ref()?.selector.match_labels.as_ref()?;
    if labels.is_empty() {
        return None;
    }
    Some(
        labels
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(","),
    )
}

fn is_running(pod: &Pod) -> bool {
    pod.status.as_ref().and_then(|s| s.phase.as_deref()) == Some("Running")
}

// =============================================================================
// KubeCluster
// =============================================================================

/// Cluster adapter talking to the Kubernetes API.
///
/// Credentials come from the ambient kubeconfig or in-cluster service account.
#[derive(Clone)]
pub struct KubeCluster {
    client: Client,
    poll_interval: Duration,
}

impl KubeCluster {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Connect using the default kubeconfig resolution.
    pub async fn connect() -> Result<Self, ClusterError> {
        let client = Client::try_default()
            .await
            .map_err(|e| ClusterError::Transport(format!("failed to create client: {}", e)))?;
        Ok(Self::new(client))
    }

    /// Set how often rollout status is polled.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    fn deployments(&self, namespace: &Namespace) -> Api<Deployment> {
        Api::namespaced(self.client.clone(), namespace.as_str())
    }

    fn services(&self, namespace: &Namespace) -> Api<Service> {
        Api::namespaced(self.client.clone(), namespace.as_str())
    }

    fn pods(&self, namespace: &Namespace) -> Api<Pod> {
        Api::namespaced(self.client.clone(), namespace.as_str())
    }

    async fn get_deployment(
        &self,
        name: &WorkloadName,
        namespace: &Namespace,
    ) -> Result<Deployment, ClusterError> {
        self.deployments(namespace)
            .get(name.as_str())
            .await
            .map_err(|e| map_kube_error(e, &format!("deployment {}/{}", namespace, name)))
    }

    /// Poll until converged or stalled. Transient read failures are retried.
    async fn poll_rollout(
        &self,
        name: &WorkloadName,
        namespace: &Namespace,
    ) -> Result<(), ClusterError> {
        loop {
            match self.get_deployment(name, namespace).await {
                Ok(deployment) => match rollout_snapshot(&deployment).progress() {
                    RolloutProgress::Converged => return Ok(()),
                    RolloutProgress::Stalled(reason) => {
                        return Err(ClusterError::RolloutStalled(reason));
                    }
                    RolloutProgress::Progressing(reason) => {
                        tracing::debug!(workload = %name, "rollout in progress: {}", reason);
                    }
                },
                Err(e) if e.is_transient() => {
                    tracing::warn!(workload = %name, "rollout status read failed, retrying: {}", e);
                }
                Err(e) => return Err(e),
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[async_trait]
impl WorkloadQuery for KubeCluster {
    async fn workload_exists(
        &self,
        name: &WorkloadName,
        namespace: &Namespace,
    ) -> Result<bool, ClusterError> {
        let found = self
            .deployments(namespace)
            .get_opt(name.as_str())
            .await
            .map_err(|e| map_kube_error(e, &format!("deployment {}/{}", namespace, name)))?;
        Ok(found.is_some())
    }

    async fn count_running_pods(
        &self,
        name: &WorkloadName,
        namespace: &Namespace,
    ) -> Result<u32, ClusterError> {
        let deployment = self.get_deployment(name, namespace).await?;
        let selector = label_selector(&deployment)
            .unwrap_or_else(|| format!("{}={}", NAME_LABEL, name));

        let pods = self
            .pods(namespace)
            .list(&ListParams::default().labels(&selector))
            .await
            .map_err(|e| map_kube_error(e, &format!("pods {} in {}", selector, namespace)))?;

        let running = pods.items.iter().filter(|p| is_running(p)).count();
        Ok(u32::try_from(running).unwrap_or(u32::MAX))
    }

    async fn describe(
        &self,
        name: &WorkloadName,
        namespace: &Namespace,
    ) -> Result<Option<WorkloadState>, ClusterError> {
        let found = self
            .deployments(namespace)
            .get_opt(name.as_str())
            .await
            .map_err(|e| map_kube_error(e, &format!("deployment {}/{}", namespace, name)))?;
        Ok(found.map(|d| workload_state(&d, name)))
    }
}

#[async_trait]
impl WorkloadMutation for KubeCluster {
    async fn create_workload(
        &self,
        name: &WorkloadName,
        namespace: &Namespace,
        image: &ImageRef,
        replicas: NonZeroU32,
    ) -> Result<(), ClusterError> {
        let deployment = build_deployment(name, namespace, image, replicas);
        let params = PostParams {
            field_manager: Some(FIELD_MANAGER.to_string()),
            ..Default::default()
        };

        self.deployments(namespace)
            .create(&params, &deployment)
            .await
            .map_err(|e| map_kube_error(e, &format!("create deployment {}/{}", namespace, name)))?;
        Ok(())
    }

    async fn expose_endpoint(
        &self,
        name: &WorkloadName,
        namespace: &Namespace,
        port: u16,
    ) -> Result<(), ClusterError> {
        let service = build_service(name, namespace, port);
        let params = PostParams {
            field_manager: Some(FIELD_MANAGER.to_string()),
            ..Default::default()
        };

        self.services(namespace)
            .create(&params, &service)
            .await
            .map_err(|e| map_kube_error(e, &format!("create service {}/{}", namespace, name)))?;
        Ok(())
    }

    async fn update_image(
        &self,
        name: &WorkloadName,
        namespace: &Namespace,
        image: &ImageRef,
    ) -> Result<(), ClusterError> {
        let deployment = self.get_deployment(name, namespace).await?;
        let container = primary_container(&deployment, name)
            .map(|c| c.name.clone())
            .ok_or_else(|| {
                ClusterError::NotFound(format!("no container in deployment {}/{}", namespace, name))
            })?;

        // Strategic merge patches containers by name, leaving the rest untouched
        let patch = json!({
            "spec": {
                "template": {
                    "spec": {
                        "containers": [{ "name": container, "image": image.to_string() }]
                    }
                }
            }
        });

        self.deployments(namespace)
            .patch(
                name.as_str(),
                &write_params(),
                &Patch::Strategic(&patch),
            )
            .await
            .map_err(|e| map_kube_error(e, &format!("set image on {}/{}", namespace, name)))?;
        Ok(())
    }

    async fn scale(
        &self,
        name: &WorkloadName,
        namespace: &Namespace,
        replicas: NonZeroU32,
    ) -> Result<(), ClusterError> {
        let patch = json!({ "spec": { "replicas": replicas.get() } });

        self.deployments(namespace)
            .patch_scale(
                name.as_str(),
                &write_params(),
                &Patch::Merge(&patch),
            )
            .await
            .map_err(|e| map_kube_error(e, &format!("scale {}/{}", namespace, name)))?;
        Ok(())
    }
}

#[async_trait]
impl RolloutOps for KubeCluster {
    async fn await_rollout(
        &self,
        name: &WorkloadName,
        namespace: &Namespace,
        timeout: Duration,
    ) -> Result<(), ClusterError> {
        tokio::time::timeout(timeout, self.poll_rollout(name, namespace))
            .await
            .map_err(|_| ClusterError::Timeout(timeout))?
    }
}
