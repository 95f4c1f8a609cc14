//! # Core Error Types
//!
//! Centralized error definitions for the core-logic crate.
//! All errors implement `std::error::Error` and `std::fmt::Display`.

use thiserror::Error;

/// Configuration and credential-file errors
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("I/O error reading {path}: {msg}")]
    IoError { path: String, msg: String },
}

/// Errors produced by remote API calls.
///
/// These never escalate past the API client boundary: every public
/// operation logs the error and degrades to a "no result" value.
#[derive(Error, Debug, Clone)]
pub enum NetworkError {
    #[error("HTTP error {status_code} from {endpoint}: {detail}")]
    HttpError {
        status_code: u16,
        endpoint: String,
        detail: String,
    },

    #[error("Transport error for {endpoint}: {reason}")]
    Transport { endpoint: String, reason: String },

    #[error("Invalid response from {endpoint}: {reason}")]
    InvalidResponse { endpoint: String, reason: String },
}
