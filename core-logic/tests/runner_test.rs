use anyhow::Result;
use async_trait::async_trait;
use core_logic::traits::{Worker, WorkerStats};
use core_logic::WorkerRunner;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

struct MockWorker {
    ticks: Arc<AtomicU64>,
}

#[async_trait]
impl Worker for MockWorker {
    async fn start(&self, cancellation_token: CancellationToken) -> Result<WorkerStats> {
        let mut stats = WorkerStats::default();
        loop {
            tokio::select! {
                _ = cancellation_token.cancelled() => break,
                _ = sleep(Duration::from_millis(10)) => {
                    self.ticks.fetch_add(1, Ordering::SeqCst);
                    stats.success += 1;
                }
            }
        }
        Ok(stats)
    }

    async fn stop(&self) -> Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_runner_stops_all_workers_on_cancel() {
    let ticks = Arc::new(AtomicU64::new(0));
    let workers: Vec<Box<dyn Worker>> = (0..3)
        .map(|_| {
            Box::new(MockWorker {
                ticks: Arc::clone(&ticks),
            }) as Box<dyn Worker>
        })
        .collect();

    let token = CancellationToken::new();
    let cancel = token.clone();
    tokio::spawn(async move {
        sleep(Duration::from_millis(100)).await;
        cancel.cancel();
    });

    WorkerRunner::run_until_cancelled(workers, token)
        .await
        .unwrap();

    assert!(ticks.load(Ordering::SeqCst) > 0);
}

#[tokio::test]
async fn test_runner_survives_a_failing_worker() {
    struct FailingWorker;

    #[async_trait]
    impl Worker for FailingWorker {
        async fn start(&self, _token: CancellationToken) -> Result<WorkerStats> {
            Err(anyhow::anyhow!("boom"))
        }

        async fn stop(&self) -> Result<()> {
            Ok(())
        }
    }

    let ticks = Arc::new(AtomicU64::new(0));
    let workers: Vec<Box<dyn Worker>> = vec![
        Box::new(FailingWorker),
        Box::new(MockWorker {
            ticks: Arc::clone(&ticks),
        }),
    ];

    let token = CancellationToken::new();
    let cancel = token.clone();
    tokio::spawn(async move {
        sleep(Duration::from_millis(100)).await;
        cancel.cancel();
    });

    // One worker failing must not bring down the run or the other worker.
    WorkerRunner::run_until_cancelled(workers, token)
        .await
        .unwrap();

    assert!(ticks.load(Ordering::SeqCst) > 0);
}
