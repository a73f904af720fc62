// ABOUTME: Entry point for the kubeship CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use commands::DeployArgs;
use kubeship::config::{self, Overrides};
use kubeship::error::Result;
use kubeship::output::Output;
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose when set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let output = Output::new(cli.output_mode());

    match run(cli, output).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            output.error(&e.to_string());
            std::process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when the command ran but the outcome is a failure.
async fn run(cli: Cli, output: Output) -> Result<bool> {
    let cwd = env::current_dir()?;

    match cli.command {
        Commands::Init {
            workload,
            image,
            force,
        } => {
            config::init_config(&cwd, workload.as_deref(), image.as_deref(), force)?;
            output.success(&format!("Created {}", config::CONFIG_FILENAME));
            Ok(true)
        }
        Commands::Deploy {
            destination,
            image,
            replicas,
            environment,
            branch,
            commit,
            workdir,
            keep_image,
        } => {
            let args = DeployArgs {
                destination,
                overrides: Overrides {
                    image,
                    replicas,
                    environment,
                    branch,
                    commit,
                },
                workdir,
                keep_image,
            };
            let report = commands::deploy(&cwd, args, output).await?;
            Ok(report.succeeded())
        }
        Commands::Status { destination } => {
            commands::status(&cwd, destination.as_deref(), &output).await?;
            Ok(true)
        }
    }
}
