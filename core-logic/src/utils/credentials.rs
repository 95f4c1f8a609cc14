use crate::error::ConfigError;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::{error, info};

/// Reads a newline-delimited text file into trimmed, non-empty lines,
/// preserving order.
pub fn load_lines(path: &Path) -> Result<Vec<String>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.display().to_string(),
        msg: e.to_string(),
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Appends a single line to a file, creating it if needed.
pub fn append_line(path: &Path, line: &str) -> Result<(), ConfigError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            msg: e.to_string(),
        })?;

    writeln!(file, "{}", line).map_err(|e| ConfigError::IoError {
        path: path.display().to_string(),
        msg: e.to_string(),
    })?;

    info!("Data saved to {}", path.display());
    Ok(())
}

pub struct TokenManager;

impl TokenManager {
    /// Loads bearer tokens from the given file.
    ///
    /// A read failure is reported and degrades to an empty list; the caller
    /// decides whether zero tokens is fatal.
    pub fn load(path: &str) -> Vec<String> {
        match load_lines(Path::new(path)) {
            Ok(tokens) => {
                info!("Loaded {} tokens from {}", tokens.len(), path);
                tokens
            }
            Err(e) => {
                error!("Error reading token file: {}", e);
                Vec::new()
            }
        }
    }
}
