// ABOUTME: Build metadata configuration (environment, branch, commit).
// ABOUTME: Values only flow into the run report.

use serde::Deserialize;

use super::EnvValue;
use crate::context::RunMetadata;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetadataConfig {
    #[serde(default)]
    pub environment: Option<EnvValue>,
    #[serde(default)]
    pub branch: Option<EnvValue>,
    #[serde(default)]
    pub commit: Option<EnvValue>,
}

impl MetadataConfig {
    pub fn resolve(&self) -> RunMetadata {
        RunMetadata {
            environment: self.environment.as_ref().and_then(EnvValue::resolve_optional),
            branch: self.branch.as_ref().and_then(EnvValue::resolve_optional),
            commit: self.commit.as_ref().and_then(EnvValue::resolve_optional),
        }
    }
}
