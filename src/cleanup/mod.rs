// ABOUTME: Local teardown run once at the end of every promotion.
// ABOUTME: Failures are downgraded to warnings so they never change the run's result.

mod error;
mod image;
mod step;
mod workdir;

pub use error::{CleanupError, CleanupErrorKind};
pub use image::LocalImageCleanup;
pub use step::CleanupStep;
pub use workdir::WorkdirCleanup;

use std::fmt;

use crate::config::CleanupConfig;
use crate::diagnostics::{Diagnostics, Warning};
use crate::types::ImageRef;

/// Ordered set of cleanup steps.
///
/// `run` consumes the handler, so a run can tear down at most once.
#[derive(Default)]
pub struct CleanupHandler {
    steps: Vec<Box<dyn CleanupStep>>,
}

impl CleanupHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the standard steps from config.
    ///
    /// `keep_image` overrides `remove_local_image` for a single run.
    pub fn from_config(config: &CleanupConfig, image: &ImageRef, keep_image: bool) -> Self {
        let mut handler = Self::new();
        if config.remove_local_image && !keep_image {
            handler = handler.with_step(LocalImageCleanup::new(image.clone()));
        }
        if let Some(ref workdir) = config.workdir {
            handler = handler.with_step(WorkdirCleanup::new(workdir.clone()));
        }
        handler
    }

    pub fn with_step(mut self, step: impl CleanupStep + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step in order, recording failures as warnings.
    pub async fn run(self, diag: &mut Diagnostics) {
        for step in &self.steps {
            match step.run().await {
                Ok(()) => tracing::debug!("Cleanup step '{}' done", step.name()),
                Err(e) => diag.warn(Warning::cleanup_failure(format!(
                    "{} cleanup failed: {}",
                    step.name(),
                    e
                ))),
            }
        }
    }
}

impl fmt::Debug for CleanupHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.steps.iter().map(|s| s.name()))
            .finish()
    }
}
