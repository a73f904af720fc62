// ABOUTME: Configuration types and parsing for kubeship.yml.
// ABOUTME: Handles YAML parsing, env var interpolation, destination merging, and context building.

mod cleanup;
mod deserialize;
mod env_value;
mod init;
mod metadata;
mod retry;

pub use cleanup::CleanupConfig;
pub use env_value::EnvValue;
pub use init::init_config;
pub use metadata::MetadataConfig;
pub use retry::RetryConfig;

use crate::context::{DEFAULT_PORT, DEFAULT_ROLLOUT_TIMEOUT, DeploymentContext};
use crate::error::{Error, Result};
use crate::types::{ImageRef, Namespace, WorkloadName};
use deserialize::{deserialize_namespace, deserialize_namespace_option, deserialize_workload_name};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "kubeship.yml";
pub const CONFIG_FILENAME_ALT: &str = "kubeship.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".kubeship/config.yml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(deserialize_with = "deserialize_workload_name")]
    pub workload: WorkloadName,

    /// Usually supplied by the build stage, either here as `{ env: VAR }` or via `--image`.
    #[serde(default)]
    pub image: Option<EnvValue>,

    #[serde(default, deserialize_with = "deserialize_namespace")]
    pub namespace: Namespace,

    #[serde(default = "default_replicas")]
    pub replicas: u32,

    #[serde(default = "default_rollout_timeout", with = "humantime_serde")]
    pub rollout_timeout: Duration,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub metadata: MetadataConfig,

    #[serde(default)]
    pub update_retry: RetryConfig,

    #[serde(default)]
    pub cleanup: CleanupConfig,

    #[serde(default)]
    pub destinations: HashMap<String, Destination>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Destination {
    #[serde(default, deserialize_with = "deserialize_namespace_option")]
    pub namespace: Option<Namespace>,

    #[serde(default)]
    pub image: Option<EnvValue>,

    #[serde(default)]
    pub replicas: Option<u32>,

    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default, with = "humantime_serde")]
    pub rollout_timeout: Option<Duration>,

    #[serde(default)]
    pub environment: Option<EnvValue>,
}

fn default_replicas() -> u32 {
    1
}

fn default_rollout_timeout() -> Duration {
    DEFAULT_ROLLOUT_TIMEOUT
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Values given on the command line. Each one wins over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub image: Option<String>,
    pub replicas: Option<u32>,
    pub environment: Option<String>,
    pub branch: Option<String>,
    pub commit: Option<String>,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                tracing::debug!("Loading config from {}", path.display());
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    pub fn for_destination(&self, name: &str) -> Result<Config> {
        let dest = self
            .destinations
            .get(name)
            .ok_or_else(|| Error::UnknownDestination(name.to_string()))?;

        let mut merged = self.clone();

        if let Some(ref namespace) = dest.namespace {
            merged.namespace = namespace.clone();
        }

        if dest.image.is_some() {
            merged.image = dest.image.clone();
        }

        if let Some(replicas) = dest.replicas {
            merged.replicas = replicas;
        }

        if let Some(port) = dest.port {
            merged.port = port;
        }

        if let Some(timeout) = dest.rollout_timeout {
            merged.rollout_timeout = timeout;
        }

        // The destination name doubles as the environment label unless one is given
        merged.metadata.environment = dest
            .environment
            .clone()
            .or_else(|| merged.metadata.environment.clone())
            .or_else(|| Some(EnvValue::Literal(name.to_string())));

        Ok(merged)
    }

    /// Resolve env references, apply overrides, and validate into a run context.
    pub fn to_context(&self, overrides: &Overrides) -> Result<DeploymentContext> {
        let image = match (&overrides.image, &self.image) {
            (Some(image), _) => image.clone(),
            (None, Some(value)) => value.resolve()?,
            (None, None) => {
                return Err(Error::InvalidConfig(
                    "no image given: set `image` in config or pass --image".to_string(),
                ));
            }
        };
        let image = ImageRef::parse(&image).map_err(|e| Error::InvalidConfig(e.to_string()))?;

        let mut metadata = self.metadata.resolve();
        if overrides.environment.is_some() {
            metadata.environment = overrides.environment.clone();
        }
        if overrides.branch.is_some() {
            metadata.branch = overrides.branch.clone();
        }
        if overrides.commit.is_some() {
            metadata.commit = overrides.commit.clone();
        }

        let context = DeploymentContext::builder(self.workload.clone(), image)
            .namespace(self.namespace.clone())
            .replicas(overrides.replicas.unwrap_or(self.replicas))
            .rollout_timeout(self.rollout_timeout)
            .port(self.port)
            .update_retry(self.update_retry.attempts, self.update_retry.backoff)
            .metadata(metadata)
            .build()?;

        Ok(context)
    }
}
