// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};
use kubeship::output::OutputMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kubeship")]
#[command(about = "Promote a built container image to a Kubernetes workload")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print only the final result
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Normal
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new kubeship.yml configuration file
    Init {
        /// Workload name to write into the config
        #[arg(long)]
        workload: Option<String>,

        /// Image reference to write into the config
        #[arg(long)]
        image: Option<String>,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Promote the image to the workload and verify the rollout
    Deploy {
        /// Target destination (defined in config)
        #[arg(short, long)]
        destination: Option<String>,

        /// Image reference to promote (overrides config)
        #[arg(long)]
        image: Option<String>,

        /// Desired replica count (overrides config)
        #[arg(long)]
        replicas: Option<u32>,

        /// Environment label recorded in the report
        #[arg(long)]
        environment: Option<String>,

        /// Source branch recorded in the report
        #[arg(long)]
        branch: Option<String>,

        /// Source commit recorded in the report
        #[arg(long)]
        commit: Option<String>,

        /// Build work directory to remove after the run
        #[arg(long)]
        workdir: Option<PathBuf>,

        /// Keep the local image instead of removing it after the run
        #[arg(long)]
        keep_image: bool,
    },

    /// Show the workload's current state in the cluster
    Status {
        /// Target destination (defined in config)
        #[arg(short, long)]
        destination: Option<String>,
    },
}
