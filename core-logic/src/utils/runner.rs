use crate::traits::Worker;
use anyhow::Result;
use tokio::signal;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn, Instrument};

pub struct WorkerRunner;

impl WorkerRunner {
    /// Spawns one task per account worker and waits for all of them,
    /// shutting down cooperatively on SIGINT or SIGTERM.
    pub async fn run_workers(workers: Vec<Box<dyn Worker>>) -> Result<()> {
        let token = CancellationToken::new();
        Self::spawn_signal_listener(token.clone());
        Self::run_until_cancelled(workers, token).await
    }

    /// Inner entry point: runs the workers under an externally owned
    /// cancellation token.
    pub async fn run_until_cancelled(
        workers: Vec<Box<dyn Worker>>,
        token: CancellationToken,
    ) -> Result<()> {
        let mut set = JoinSet::new();

        let start_time = std::time::Instant::now();
        info!("Starting {} account workers...", workers.len());

        for (i, worker) in workers.into_iter().enumerate() {
            let id = i + 1;
            let span = tracing::info_span!("worker", worker_id = format!("{:03}", id));
            let child_token = token.clone();

            set.spawn(
                async move {
                    match worker.start(child_token).await {
                        Ok(stats) => Ok(stats),
                        Err(e) => {
                            error!("Worker {} failed: {:?}", id, e);
                            Err(e)
                        }
                    }
                }
                .instrument(span),
            );
        }

        let mut total_success = 0;
        let mut total_failed = 0;

        while let Some(res) = set.join_next().await {
            match res {
                Ok(Ok(stats)) => {
                    total_success += stats.success;
                    total_failed += stats.failed;
                }
                Ok(Err(_)) => {
                    // Already logged in the task
                }
                Err(e) => {
                    error!("A worker task panicked or failed to join: {:?}", e);
                }
            }
        }

        let total_duration = start_time.elapsed();
        let total = total_success + total_failed;
        let rate = if total > 0 {
            (total_success as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        info!("🛑 Shutdown Complete.");
        info!(
            "Total Time: {:.1}s | Calls OK: {} | Calls Failed: {} | Success Rate: {:.2}%",
            total_duration.as_secs_f64(),
            total_success,
            total_failed,
            rate
        );

        Ok(())
    }

    /// Cancels the token on SIGINT or SIGTERM so every worker loop can
    /// finish its current cycle and return.
    fn spawn_signal_listener(token: CancellationToken) {
        tokio::spawn(async move {
            let ctrl_c = async {
                if let Err(err) = signal::ctrl_c().await {
                    error!("Unable to listen for shutdown signal: {}", err);
                    std::future::pending::<()>().await;
                }
            };

            #[cfg(unix)]
            let terminate = async {
                match signal::unix::signal(signal::unix::SignalKind::terminate()) {
                    Ok(mut sig) => {
                        sig.recv().await;
                    }
                    Err(err) => {
                        error!("Unable to install SIGTERM handler: {}", err);
                        std::future::pending::<()>().await;
                    }
                }
            };

            #[cfg(not(unix))]
            let terminate = std::future::pending::<()>();

            tokio::select! {
                _ = ctrl_c => {
                    warn!("🛑 Received Ctrl+C. Initiating graceful shutdown...");
                }
                _ = terminate => {
                    warn!("🛑 Received terminate signal. Initiating graceful shutdown...");
                }
            }

            token.cancel();
        });
    }
}
