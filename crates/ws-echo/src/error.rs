//! Application-level errors.

use std::time::Duration;

use echo_core::ConfigError;
use echo_transport::TransportError;
use thiserror::Error;

/// Errors that end a ws-echo run with a non-zero exit status.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration or logging setup failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The transport could not be created.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Terminal or stdout I/O failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The connection closed before it ever opened.
    #[error("could not connect to {address}")]
    ConnectFailed {
        /// Peer address
        address: String,
    },

    /// Nothing happened within the wait bound.
    #[error("timed out after {} waiting for {waiting_for}", human(.waited))]
    Timeout {
        /// What was expected
        waiting_for: &'static str,
        /// How long we waited
        waited: Duration,
    },
}

fn human(d: &Duration) -> humantime::FormattedDuration {
    humantime::format_duration(*d)
}

/// Result type alias for application operations.
pub type Result<T> = std::result::Result<T, AppError>;
