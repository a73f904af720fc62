// ABOUTME: Deploy command implementation.
// ABOUTME: Builds the run context, connects to the cluster, and drives the promotion.

use kubeship::cleanup::{CleanupHandler, WorkdirCleanup};
use kubeship::cluster::KubeCluster;
use kubeship::config::Overrides;
use kubeship::context::DeploymentContext;
use kubeship::deploy::promote;
use kubeship::diagnostics::Diagnostics;
use kubeship::error::Result;
use kubeship::output::Output;
use kubeship::report::RunReport;
use std::path::{Path, PathBuf};

use super::load_config;

pub struct DeployArgs {
    pub destination: Option<String>,
    pub overrides: Overrides,
    pub workdir: Option<PathBuf>,
    pub keep_image: bool,
}

/// Promote the configured image and print the report.
///
/// Local teardown runs on every exit path, including config errors and an
/// unreachable cluster.
pub async fn deploy(dir: &Path, args: DeployArgs, output: Output) -> Result<RunReport> {
    let (context, cleanup) = match prepare(dir, &args) {
        Ok(prepared) => prepared,
        Err(e) => {
            // Without a valid config only a workdir given on the command line is known
            if let Some(workdir) = args.workdir {
                teardown(CleanupHandler::new().with_step(WorkdirCleanup::new(workdir)), &output)
                    .await;
            }
            return Err(e);
        }
    };

    output.progress(&format!(
        "Promoting {} to {}/{}",
        context.image(),
        context.namespace(),
        context.workload()
    ));

    let cluster = match KubeCluster::connect().await {
        Ok(cluster) => cluster,
        Err(e) => {
            teardown(cleanup, &output).await;
            return Err(e.into());
        }
    };

    let report = promote(&context, &cluster, cleanup, &output).await;
    output.report(&report);

    Ok(report)
}

fn prepare(dir: &Path, args: &DeployArgs) -> Result<(DeploymentContext, CleanupHandler)> {
    let config = load_config(dir, args.destination.as_deref())?;
    let context = config.to_context(&args.overrides)?;

    let mut cleanup_config = config.cleanup.clone();
    if args.workdir.is_some() {
        cleanup_config.workdir = args.workdir.clone();
    }
    let cleanup = CleanupHandler::from_config(&cleanup_config, context.image(), args.keep_image);

    Ok((context, cleanup))
}

/// Run cleanup outside a promotion and surface its warnings.
async fn teardown(cleanup: CleanupHandler, output: &Output) {
    let mut diag = Diagnostics::default();
    cleanup.run(&mut diag).await;
    for warning in diag.warnings() {
        output.warning(&warning.message);
    }
}
