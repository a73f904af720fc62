// ABOUTME: Local cleanup configuration run after every promotion.
// ABOUTME: Controls removal of the cached image and the transient work directory.

use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct CleanupConfig {
    #[serde(default = "default_remove_local_image")]
    pub remove_local_image: bool,

    #[serde(default)]
    pub workdir: Option<PathBuf>,
}

fn default_remove_local_image() -> bool {
    true
}

impl Default for CleanupConfig {
    fn default() -> Self {
        CleanupConfig {
            remove_local_image: default_remove_local_image(),
            workdir: None,
        }
    }
}
