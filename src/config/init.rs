// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Creates kubeship.yml template files.

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{ImageRef, WorkloadName};

use super::CONFIG_FILENAME;

pub fn init_config(
    dir: &Path,
    workload: Option<&str>,
    image: Option<&str>,
    force: bool,
) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let workload = WorkloadName::new(workload.unwrap_or("my-app"))
        .map_err(|e| Error::InvalidConfig(e.to_string()))?;

    let image = image
        .map(ImageRef::parse)
        .transpose()
        .map_err(|e| Error::InvalidConfig(e.to_string()))?;

    let yaml = generate_template_yaml(&workload, image.as_ref());
    std::fs::write(&config_path, yaml)?;

    Ok(())
}

fn generate_template_yaml(workload: &WorkloadName, image: Option<&ImageRef>) -> String {
    let image_line = match image {
        Some(image) => format!("image: {}", image),
        None => "image:\n  env: IMAGE_REF".to_string(),
    };

    format!(
        r#"workload: {workload}
{image_line}
namespace: default
replicas: 1
rollout_timeout: 5m
port: 8080

metadata:
  branch:
    env: CI_COMMIT_BRANCH
  commit:
    env: CI_COMMIT_SHA

cleanup:
  remove_local_image: true
  # workdir: ./build

# destinations:
#   staging:
#     namespace: staging
#   production:
#     namespace: production
#     replicas: 3
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn template_parses_back() {
        let workload = WorkloadName::new("api").unwrap();
        let image = ImageRef::parse("ghcr.io/org/api:v1").unwrap();
        let yaml = generate_template_yaml(&workload, Some(&image));

        let config = Config::from_yaml(&yaml).unwrap();
        assert_eq!(config.workload.as_str(), "api");
        assert_eq!(
            config.image,
            Some(crate::config::EnvValue::Literal("ghcr.io/org/api:v1".to_string()))
        );
        assert_eq!(config.replicas, 1);
    }

    #[test]
    fn template_without_image_references_env() {
        let workload = WorkloadName::new("api").unwrap();
        let yaml = generate_template_yaml(&workload, None);

        let config = Config::from_yaml(&yaml).unwrap();
        assert!(matches!(config.image, Some(crate::config::EnvValue::FromEnv { .. })));
    }
}
