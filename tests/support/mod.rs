// ABOUTME: Test support utilities.
// ABOUTME: Provides an in-memory cluster, recording cleanup steps, and context helpers.

use std::sync::Once;
use std::time::Duration;

use kubeship::context::DeploymentContext;
use kubeship::types::{ImageRef, Namespace, WorkloadName};

// Each test binary only uses some of these modules, so allow dead_code.
#[allow(dead_code)]
pub mod fake_cluster;
#[allow(dead_code)]
pub mod recording_cleanup;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env().add_directive("kubeship=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Context for `web` in `staging` with the given replica count.
#[allow(dead_code)]
pub fn context(replicas: u32) -> DeploymentContext {
    DeploymentContext::builder(
        WorkloadName::new("web").unwrap(),
        ImageRef::parse("registry.example.com/team/web:abc123").unwrap(),
    )
    .namespace(Namespace::new("staging").unwrap())
    .replicas(replicas)
    .rollout_timeout(Duration::from_secs(60))
    .update_retry(3, Duration::from_millis(10))
    .build()
    .unwrap()
}
