//! Connection lifecycle state.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a connection.
///
/// Mirrors the WebSocket ready state. `Errored` is a side channel: a
/// transport that reports an error still finishes in `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    /// Handshake in progress.
    #[default]
    Connecting,
    /// Handshake complete, text can flow both ways.
    Open,
    /// A local close was requested and the close handshake is running.
    Closing,
    /// The connection is gone for good.
    Closed,
    /// The transport reported an error; `Closed` follows.
    Errored,
}

impl ConnectionState {
    /// Whether messages can be transmitted in this state.
    pub fn is_open(self) -> bool {
        self == Self::Open
    }

    /// Whether the connection has reached its terminal state.
    pub fn is_closed(self) -> bool {
        self == Self::Closed
    }

    /// Short lowercase name, as used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Closing => "closing",
            Self::Closed => "closed",
            Self::Errored => "errored",
        }
    }
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
