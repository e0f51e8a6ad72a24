//! Entries of the display log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which side produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageDirection {
    /// Typed locally and handed to the transport.
    Sent,
    /// Delivered by the peer.
    Received,
}

impl MessageDirection {
    /// Label shown in front of the message text.
    pub fn label(self) -> &'static str {
        match self {
            Self::Sent => "Sent:",
            Self::Received => "Received:",
        }
    }
}

/// One line of the message list.
///
/// The text is kept exactly as typed or received; nothing is escaped or
/// trimmed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEntry {
    /// Direction (sent or received)
    pub direction: MessageDirection,
    /// Raw message text
    pub text: String,
    /// When the entry was appended
    pub timestamp: DateTime<Utc>,
}

impl MessageEntry {
    /// Create a new entry stamped with the current time.
    pub fn new(direction: MessageDirection, text: impl Into<String>) -> Self {
        Self {
            direction,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a sent entry.
    pub fn sent(text: impl Into<String>) -> Self {
        Self::new(MessageDirection::Sent, text)
    }

    /// Create a received entry.
    pub fn received(text: impl Into<String>) -> Self {
        Self::new(MessageDirection::Received, text)
    }

    /// Render as `"<label> <text>"`.
    pub fn display_line(&self) -> String {
        format!("{} {}", self.direction.label(), self.text)
    }
}
