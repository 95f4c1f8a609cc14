//! # Core Logic - Shared Utilities for the Depined Poller
//!
//! This crate provides the pieces shared by every account worker:
//! credential loading, proxy list management, worker supervision,
//! metrics, and logging.
//!
//! ## Modules
//!
//! - [`config`] - Account and polling configuration structures
//! - [`error`] - Typed error handling with thiserror
//! - [`metrics`] - Poll and API latency metrics collection
//! - [`traits`] - Core trait definitions
//! - [`utils`] - Utility modules (credentials, proxies, runner, logger)

// Module declarations - internal modules marked pub(crate)
pub mod config;
pub mod error;
pub mod metrics;
pub mod traits;
pub(crate) mod utils;

// Selective exports - only public API types
pub use config::{Account, PollConfig};
pub use error::{ConfigError, NetworkError};
pub use metrics::{MetricsCollector, MetricsSnapshot};
pub use traits::{Worker, WorkerStats};

// Utils are pub(crate) - only export specific public utilities
pub use utils::{append_line, load_lines, setup_logger, ProxyManager, TokenManager, WorkerRunner};
