//! Depined multi-account polling client.
//!
//! Library surface for the `depined` binary: the API client, the
//! per-account worker, and the TOML configuration.

pub mod api;
pub mod config;
pub mod worker;
