// ABOUTME: Command module aggregator for the kubeship CLI.
// ABOUTME: Re-exports deploy and status command handlers.

mod deploy;
mod status;

pub use deploy::{DeployArgs, deploy};
pub use status::status;

use kubeship::config::Config;
use kubeship::error::Result;
use std::path::Path;

/// Discover the config in `dir` and apply destination overrides if given.
fn load_config(dir: &Path, destination: Option<&str>) -> Result<Config> {
    let config = Config::discover(dir)?;
    match destination {
        Some(dest) => config.for_destination(dest),
        None => Ok(config),
    }
}
