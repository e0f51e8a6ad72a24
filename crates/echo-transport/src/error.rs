//! Error types for transport operations.

use echo_models::ConnectionState;
use thiserror::Error;

/// Errors raised by a transport.
///
/// Payloads are opaque diagnostic strings so the error can be cloned to every
/// subscriber of the event bus.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The peer address is not a usable ws:// or wss:// URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The opening handshake failed.
    #[error("handshake failed: {0}")]
    Handshake(String),

    /// The connection failed after it was established.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// A send was attempted while the connection was not open.
    #[error("connection is not open (state: {0})")]
    NotOpen(ConnectionState),

    /// The connection task is no longer running.
    #[error("connection task has stopped")]
    ChannelClosed,
}

/// Result type alias for transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;
