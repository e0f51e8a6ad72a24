//! Status indicator derived from the connection lifecycle.

use serde::{Deserialize, Serialize};

use crate::state::ConnectionState;

/// Label shown before the handshake completes.
pub const CONNECTING_LABEL: &str = "Connecting...";

/// Label shown once the connection is closed.
pub const DISCONNECTED_LABEL: &str = "Disconnected from WebSocket.";

/// Visual class of the status indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusClass {
    /// Waiting for the handshake.
    Connecting,
    /// Connection is up.
    Open,
    /// Connection is gone.
    Closed,
}

/// The (label, class) pair shown in the status area.
///
/// Never stored on its own; always computed from a lifecycle state and the
/// peer address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusIndicator {
    /// Text shown to the user
    pub label: String,
    /// Visual marker
    pub class: StatusClass,
}

impl StatusIndicator {
    /// Compute the indicator for `state`.
    ///
    /// `Closing` and `Errored` keep the open look: the visible status only
    /// moves to closed once the close event arrives.
    pub fn for_state(state: ConnectionState, address: &str) -> Self {
        match state {
            ConnectionState::Connecting => Self {
                label: CONNECTING_LABEL.to_string(),
                class: StatusClass::Connecting,
            },
            ConnectionState::Open | ConnectionState::Closing | ConnectionState::Errored => Self {
                label: format!("Connected to: {}", address),
                class: StatusClass::Open,
            },
            ConnectionState::Closed => Self {
                label: DISCONNECTED_LABEL.to_string(),
                class: StatusClass::Closed,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_label_includes_address() {
        let status = StatusIndicator::for_state(ConnectionState::Open, "ws://echo.websocket.org/");
        assert_eq!(status.label, "Connected to: ws://echo.websocket.org/");
        assert_eq!(status.class, StatusClass::Open);
    }

    #[test]
    fn test_closed_label_is_fixed() {
        let status = StatusIndicator::for_state(ConnectionState::Closed, "ws://anything/");
        assert_eq!(status.label, DISCONNECTED_LABEL);
        assert_eq!(status.class, StatusClass::Closed);
    }

    #[test]
    fn test_connecting() {
        let status = StatusIndicator::for_state(ConnectionState::Connecting, "ws://x/");
        assert_eq!(status.label, CONNECTING_LABEL);
        assert_eq!(status.class, StatusClass::Connecting);
    }
}
