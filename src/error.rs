// ABOUTME: Application-wide error types for kubeship.
// ABOUTME: Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

use crate::cluster::ClusterError;
use crate::context::ContextError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("configuration file not found in {0}")]
    ConfigNotFound(PathBuf),

    #[error("unknown destination: {0}")]
    UnknownDestination(String),

    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid deployment context: {0}")]
    Context(#[from] ContextError),

    #[error("cluster request failed: {0}")]
    Cluster(#[from] ClusterError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cluster_errors_are_not_reported_as_connection_failures() {
        let err = Error::from(ClusterError::Api {
            status: 403,
            message: "deployments.apps \"web\" is forbidden".to_string(),
        });
        let message = err.to_string();
        assert!(message.starts_with("cluster request failed:"), "{message}");
        assert!(message.contains("403"));
    }
}
