use anyhow::Result;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Default, Clone)]
pub struct WorkerStats {
    pub success: u64,
    pub failed: u64,
}

/// A long-running per-account task supervised by the runner.
///
/// Implementations must observe the cancellation token between cycles and
/// return their accumulated stats when it fires.
#[async_trait]
pub trait Worker: Send + Sync {
    /// Start the worker loop; runs until cancelled.
    async fn start(&self, cancellation_token: CancellationToken) -> Result<WorkerStats>;

    /// Stop the worker.
    async fn stop(&self) -> Result<()>;
}
