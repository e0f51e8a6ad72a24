//! Error types for configuration and logging setup.

use thiserror::Error;

/// Errors that can occur while preparing configuration or logging.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Filesystem error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment file could not be parsed.
    #[error("invalid env file {path}: {message}")]
    EnvFile {
        /// Path of the offending file
        path: String,
        /// Parser message
        message: String,
    },

    /// A global tracing subscriber was already installed.
    #[error("logging setup failed: {0}")]
    Logging(String),
}

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
