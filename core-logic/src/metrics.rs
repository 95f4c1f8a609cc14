use chrono::Utc;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub timestamp: String,
    pub uptime_secs: u64,
    pub polls: PollMetrics,
    pub api: ApiMetrics,
}

#[derive(Debug, Clone, Serialize)]
pub struct PollMetrics {
    pub total: u64,
    pub success: u64,
    pub failed: u64,
    pub success_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApiMetrics {
    pub total_calls: u64,
    pub avg_latency_ms: f64,
    pub min_latency_ms: u64,
    pub max_latency_ms: u64,
}

/// Process-wide counters for poll outcomes and API call latency.
#[derive(Debug)]
pub struct MetricsCollector {
    polls_total: AtomicU64,
    polls_success: AtomicU64,
    polls_failed: AtomicU64,
    api_calls: AtomicU64,
    api_latency_sum_ms: AtomicU64,
    api_min_latency_ms: AtomicU64,
    api_max_latency_ms: AtomicU64,
    start_time: Instant,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self {
            polls_total: AtomicU64::new(0),
            polls_success: AtomicU64::new(0),
            polls_failed: AtomicU64::new(0),
            api_calls: AtomicU64::new(0),
            api_latency_sum_ms: AtomicU64::new(0),
            api_min_latency_ms: AtomicU64::new(u64::MAX),
            api_max_latency_ms: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }
}

impl MetricsCollector {
    pub fn global() -> &'static Self {
        static INSTANCE: std::sync::OnceLock<MetricsCollector> = std::sync::OnceLock::new();
        INSTANCE.get_or_init(MetricsCollector::default)
    }

    /// Records the outcome of one remote poll call (heartbeat or earnings).
    pub fn record_poll(&self, success: bool) {
        self.polls_total.fetch_add(1, Ordering::SeqCst);
        if success {
            self.polls_success.fetch_add(1, Ordering::SeqCst);
        } else {
            self.polls_failed.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub fn record_api_latency(&self, latency: Duration) {
        self.api_calls.fetch_add(1, Ordering::SeqCst);
        let latency_ms = latency.as_millis() as u64;
        self.api_latency_sum_ms
            .fetch_add(latency_ms, Ordering::SeqCst);
        self.api_min_latency_ms
            .fetch_min(latency_ms, Ordering::SeqCst);
        self.api_max_latency_ms
            .fetch_max(latency_ms, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let total = self.polls_total.load(Ordering::SeqCst);
        let success = self.polls_success.load(Ordering::SeqCst);

        let api_calls = self.api_calls.load(Ordering::SeqCst);
        let latency_sum = self.api_latency_sum_ms.load(Ordering::SeqCst);
        let min_latency = self.api_min_latency_ms.load(Ordering::SeqCst);

        MetricsSnapshot {
            timestamp: Utc::now().to_rfc3339(),
            uptime_secs: self.start_time.elapsed().as_secs(),
            polls: PollMetrics {
                total,
                success,
                failed: self.polls_failed.load(Ordering::SeqCst),
                success_rate: if total > 0 {
                    success as f64 / total as f64 * 100.0
                } else {
                    0.0
                },
            },
            api: ApiMetrics {
                total_calls: api_calls,
                avg_latency_ms: if api_calls > 0 {
                    latency_sum as f64 / api_calls as f64
                } else {
                    0.0
                },
                min_latency_ms: if min_latency == u64::MAX {
                    0
                } else {
                    min_latency
                },
                max_latency_ms: self.api_max_latency_ms.load(Ordering::SeqCst),
            },
        }
    }

    pub fn to_json(&self) -> String {
        let snapshot = self.snapshot();
        serde_json::to_string_pretty(&snapshot).unwrap_or_else(|_| "{}".to_string())
    }

    pub async fn export_to_file(&self, path: &str) -> std::io::Result<()> {
        let json = self.to_json();
        tokio::fs::write(path, json).await
    }

    pub fn polls_total(&self) -> u64 {
        self.polls_total.load(Ordering::SeqCst)
    }

    pub fn polls_success(&self) -> u64 {
        self.polls_success.load(Ordering::SeqCst)
    }

    pub fn polls_failed(&self) -> u64 {
        self.polls_failed.load(Ordering::SeqCst)
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_counters() {
        let metrics = MetricsCollector::default();

        metrics.record_poll(true);
        metrics.record_poll(true);
        metrics.record_poll(false);

        assert_eq!(metrics.polls_total(), 3);
        assert_eq!(metrics.polls_success(), 2);
        assert_eq!(metrics.polls_failed(), 1);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.polls.total, 3);
        assert!((snapshot.polls.success_rate - 66.67).abs() < 0.1);
    }

    #[test]
    fn test_api_latency() {
        let metrics = MetricsCollector::default();

        metrics.record_api_latency(Duration::from_millis(100));
        metrics.record_api_latency(Duration::from_millis(300));

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.api.total_calls, 2);
        assert_eq!(snapshot.api.min_latency_ms, 100);
        assert_eq!(snapshot.api.max_latency_ms, 300);
        assert!((snapshot.api.avg_latency_ms - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_json_export() {
        let metrics = MetricsCollector::default();
        metrics.record_poll(true);

        let json = metrics.to_json();
        assert!(json.contains("polls"));
        assert!(json.contains("api"));
    }
}
