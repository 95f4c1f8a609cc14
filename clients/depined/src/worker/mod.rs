use crate::api::ApiClient;
use anyhow::Result;
use async_trait::async_trait;
use core_logic::config::{Account, PollConfig};
use core_logic::metrics::MetricsCollector;
use core_logic::traits::{Worker, WorkerStats};
use std::time::Duration;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Owns one account's lifecycle: a bootstrap snapshot, then an unbounded
/// heartbeat + earnings cycle on a fixed interval.
pub struct AccountWorker {
    account: Account,
    client: ApiClient,
    interval: Duration,
}

impl AccountWorker {
    pub fn new(config: &PollConfig, account: Account) -> Result<Self> {
        let client = ApiClient::new(&config.base_url, account.proxy.as_deref())?;
        Ok(Self {
            interval: config.interval(),
            account,
            client,
        })
    }

    /// Fetches the user snapshot once at startup. Non-fatal: the worker
    /// proceeds to polling whether or not this yields data.
    async fn bootstrap(&self) {
        if let Some(user) = self.client.get_user_info(&self.account.token).await {
            info!(
                "Account {} info: email={} verified={} tier={} points={}",
                self.account.id(),
                user.email,
                user.verified,
                user.current_tier,
                user.points_balance
            );
        }
    }

    async fn poll_cycle(&self, stats: &mut WorkerStats) {
        let metrics = MetricsCollector::global();

        match self.client.send_heartbeat(&self.account.token).await {
            Some(result) => {
                stats.success += 1;
                metrics.record_poll(true);
                info!(
                    target: "poll_result",
                    "Ping result for account {}: {}",
                    self.account.id(),
                    result
                );
            }
            None => {
                stats.failed += 1;
                metrics.record_poll(false);
                info!(
                    target: "poll_result",
                    "Ping result for account {}: no result",
                    self.account.id()
                );
            }
        }

        match self.client.get_earnings(&self.account.token).await {
            Some(earnings) => {
                stats.success += 1;
                metrics.record_poll(true);
                info!(
                    target: "poll_result",
                    "Earnings result for account {}: {}",
                    self.account.id(),
                    earnings
                );
            }
            None => {
                stats.failed += 1;
                metrics.record_poll(false);
                info!(
                    target: "poll_result",
                    "Earnings result for account {}: no result",
                    self.account.id()
                );
            }
        }
    }
}

#[async_trait]
impl Worker for AccountWorker {
    async fn start(&self, cancellation_token: CancellationToken) -> Result<WorkerStats> {
        self.bootstrap().await;

        let mut ticker = interval(self.interval);
        // The immediate tick: the first cycle runs one full interval after
        // bootstrap, matching the stock CLI.
        ticker.tick().await;

        let mut stats = WorkerStats::default();

        loop {
            tokio::select! {
                _ = cancellation_token.cancelled() => {
                    info!("Account {} stopping (cancelled).", self.account.id());
                    break;
                }
                _ = ticker.tick() => {
                    self.poll_cycle(&mut stats).await;
                }
            }
        }

        Ok(stats)
    }

    async fn stop(&self) -> Result<()> {
        info!("Account {} stopping...", self.account.id());
        Ok(())
    }
}
