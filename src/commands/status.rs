// ABOUTME: Status command implementation.
// ABOUTME: Prints the workload's observed state without changing anything.

use kubeship::cluster::{KubeCluster, WorkloadQuery};
use kubeship::error::Result;
use kubeship::output::{Output, OutputMode};
use serde::Serialize;
use std::path::Path;

use super::load_config;

#[derive(Serialize)]
struct StatusEvent<'a> {
    workload: &'a str,
    namespace: &'a str,
    exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<&'a kubeship::cluster::WorkloadState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    running_pods: Option<u32>,
}

pub async fn status(dir: &Path, destination: Option<&str>, output: &Output) -> Result<()> {
    let config = load_config(dir, destination)?;
    let cluster = KubeCluster::connect().await?;

    let state = cluster.describe(&config.workload, &config.namespace).await?;
    let running_pods = match state {
        Some(_) => Some(
            cluster
                .count_running_pods(&config.workload, &config.namespace)
                .await?,
        ),
        None => None,
    };

    if output.mode() == OutputMode::Json {
        let event = StatusEvent {
            workload: config.workload.as_str(),
            namespace: config.namespace.as_str(),
            exists: state.is_some(),
            state: state.as_ref(),
            running_pods,
        };
        if let Ok(json) = serde_json::to_string(&event) {
            println!("{json}");
        }
        return Ok(());
    }

    println!("Workload: {}", config.workload);
    println!("Namespace: {}", config.namespace);
    match state {
        None => println!("State: not deployed"),
        Some(state) => {
            println!("Image: {}", state.image.as_deref().unwrap_or("-"));
            println!(
                "Replicas: {} desired, {} updated, {} ready, {} available",
                state.replicas,
                state.updated_replicas,
                state.ready_replicas,
                state.available_replicas
            );
            println!("Running pods: {}", running_pods.unwrap_or(0));
        }
    }

    Ok(())
}
