// ABOUTME: Custom serde deserializers for config types.
// ABOUTME: Validates workload and namespace names while parsing.

use serde::Deserialize;

use crate::types::{Namespace, WorkloadName};

pub fn deserialize_workload_name<'de, D>(deserializer: D) -> Result<WorkloadName, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    WorkloadName::new(&s).map_err(|e| serde::de::Error::custom(format!("workload: {e}")))
}

pub fn deserialize_namespace<'de, D>(deserializer: D) -> Result<Namespace, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Namespace::new(&s).map_err(|e| serde::de::Error::custom(format!("namespace: {e}")))
}

pub fn deserialize_namespace_option<'de, D>(deserializer: D) -> Result<Option<Namespace>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    opt.map(|s| {
        Namespace::new(&s).map_err(|e| serde::de::Error::custom(format!("namespace: {e}")))
    })
    .transpose()
}
