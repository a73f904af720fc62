// ABOUTME: Immutable parameters for a single promotion run.
// ABOUTME: Built once from config and CLI flags, then passed to every stage by reference.

use serde::Serialize;
use std::num::NonZeroU32;
use std::time::Duration;
use thiserror::Error;

use crate::types::{ImageRef, Namespace, WorkloadName};

/// Default port exposed for newly created workloads.
pub const DEFAULT_PORT: u16 = 8080;

/// Default bound for the rollout wait.
pub const DEFAULT_ROLLOUT_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    #[error("desired replicas must be at least 1")]
    ZeroReplicas,

    #[error("rollout timeout must be greater than zero")]
    ZeroRolloutTimeout,

    #[error("endpoint port must be greater than zero")]
    ZeroPort,

    #[error("update retry attempts must be at least 1")]
    ZeroRetryAttempts,
}

/// Bounds the retry of the combined image-and-scale update step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: NonZeroU32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: NonZeroU32::new(3).unwrap_or(NonZeroU32::MIN),
            backoff: Duration::from_secs(2),
        }
    }
}

/// Build metadata carried through to the report. Never consulted for decisions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

/// Everything a run needs to know, fixed at construction.
#[derive(Debug, Clone)]
pub struct DeploymentContext {
    workload: WorkloadName,
    image: ImageRef,
    namespace: Namespace,
    replicas: NonZeroU32,
    rollout_timeout: Duration,
    port: u16,
    update_retry: RetryPolicy,
    metadata: RunMetadata,
}

impl DeploymentContext {
    pub fn builder(workload: WorkloadName, image: ImageRef) -> DeploymentContextBuilder {
        DeploymentContextBuilder {
            workload,
            image,
            namespace: Namespace::default(),
            replicas: 1,
            rollout_timeout: DEFAULT_ROLLOUT_TIMEOUT,
            port: DEFAULT_PORT,
            retry_attempts: RetryPolicy::default().attempts.get(),
            retry_backoff: RetryPolicy::default().backoff,
            metadata: RunMetadata::default(),
        }
    }

    pub fn workload(&self) -> &WorkloadName {
        &self.workload
    }

    pub fn image(&self) -> &ImageRef {
        &self.image
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn replicas(&self) -> NonZeroU32 {
        self.replicas
    }

    pub fn rollout_timeout(&self) -> Duration {
        self.rollout_timeout
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn update_retry(&self) -> RetryPolicy {
        self.update_retry
    }

    pub fn metadata(&self) -> &RunMetadata {
        &self.metadata
    }
}

/// Collects raw values and validates them in `build()`.
#[derive(Debug, Clone)]
pub struct DeploymentContextBuilder {
    workload: WorkloadName,
    image: ImageRef,
    namespace: Namespace,
    replicas: u32,
    rollout_timeout: Duration,
    port: u16,
    retry_attempts: u32,
    retry_backoff: Duration,
    metadata: RunMetadata,
}

impl DeploymentContextBuilder {
    pub fn namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = namespace;
        self
    }

    pub fn replicas(mut self, replicas: u32) -> Self {
        self.replicas = replicas;
        self
    }

    pub fn rollout_timeout(mut self, timeout: Duration) -> Self {
        self.rollout_timeout = timeout;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn update_retry(mut self, attempts: u32, backoff: Duration) -> Self {
        self.retry_attempts = attempts;
        self.retry_backoff = backoff;
        self
    }

    pub fn metadata(mut self, metadata: RunMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn build(self) -> Result<DeploymentContext, ContextError> {
        let replicas = NonZeroU32::new(self.replicas).ok_or(ContextError::ZeroReplicas)?;
        if self.rollout_timeout.is_zero() {
            return Err(ContextError::ZeroRolloutTimeout);
        }
        if self.port == 0 {
            return Err(ContextError::ZeroPort);
        }
        let attempts =
            NonZeroU32::new(self.retry_attempts).ok_or(ContextError::ZeroRetryAttempts)?;

        Ok(DeploymentContext {
            workload: self.workload,
            image: self.image,
            namespace: self.namespace,
            replicas,
            rollout_timeout: self.rollout_timeout,
            port: self.port,
            update_retry: RetryPolicy {
                attempts,
                backoff: self.retry_backoff,
            },
            metadata: self.metadata,
        })
    }
}
