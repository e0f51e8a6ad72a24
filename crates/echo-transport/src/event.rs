//! Lifecycle events delivered to transport subscribers.

use crate::error::TransportError;

/// An event raised by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// The handshake completed. Raised at most once per connection.
    Opened {
        /// Normalized peer address
        url: String,
    },
    /// The peer sent a text message.
    Message(String),
    /// The transport hit an error. A `Closed` event usually follows.
    Error(TransportError),
    /// The connection is finished. Always the last event.
    Closed,
}

impl ConnectionEvent {
    /// Short name used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Opened { .. } => "opened",
            Self::Message(_) => "message",
            Self::Error(_) => "error",
            Self::Closed => "closed",
        }
    }
}
