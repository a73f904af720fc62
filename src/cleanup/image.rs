// ABOUTME: Removes the promoted image from the local container image store.
// ABOUTME: An image that is already gone counts as removed.

use async_trait::async_trait;
use bollard::Docker;
use bollard::query_parameters::RemoveImageOptions;
use snafu::ResultExt;

use crate::types::ImageRef;

use super::error::{CleanupError, ConnectSnafu};
use super::step::CleanupStep;

#[derive(Debug, Clone)]
pub struct LocalImageCleanup {
    image: ImageRef,
}

impl LocalImageCleanup {
    pub fn new(image: ImageRef) -> Self {
        Self { image }
    }

    pub fn image(&self) -> &ImageRef {
        &self.image
    }
}

#[async_trait]
impl CleanupStep for LocalImageCleanup {
    fn name(&self) -> &str {
        "local image"
    }

    async fn run(&self) -> Result<(), CleanupError> {
        let image = self.image.to_string();
        let docker = Docker::connect_with_local_defaults().context(ConnectSnafu)?;

        let opts = RemoveImageOptions {
            force: false,
            ..Default::default()
        };

        match docker.remove_image(&image, Some(opts), None).await {
            Ok(_) => {
                tracing::debug!("Removed local image {}", image);
                Ok(())
            }
            Err(bollard::errors::Error::DockerResponseServerError {
                status_code: 404, ..
            }) => {
                tracing::debug!("Local image {} already absent", image);
                Ok(())
            }
            Err(source) => Err(CleanupError::RemoveImage { image, source }),
        }
    }
}
