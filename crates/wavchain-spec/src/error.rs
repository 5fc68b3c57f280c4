//! Error types for configuration parsing.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for configuration operations.
pub type SpecResult<T> = Result<T, ConfigError>;

/// Errors that can occur while reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be opened or read.
    #[error("cannot open config file {}: {source}", path.display())]
    Open {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A parsed command has no name.
    #[error("{origin}:{line}: empty converter name")]
    EmptyName {
        /// File name or other origin label.
        origin: String,
        /// 1-based line number.
        line: usize,
    },
}

impl ConfigError {
    /// Returns a stable error code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Open { .. } => "CONFIG_001",
            ConfigError::EmptyName { .. } => "CONFIG_002",
        }
    }
}
