// ABOUTME: The unit of local teardown run after every promotion.
// ABOUTME: Steps are independent; one failing does not stop the others.

use async_trait::async_trait;

use super::error::CleanupError;

/// A single best-effort teardown action.
///
/// Steps must tolerate the resource already being gone.
#[async_trait]
pub trait CleanupStep: Send + Sync {
    /// Short label used in warnings.
    fn name(&self) -> &str;

    async fn run(&self) -> Result<(), CleanupError>;
}
