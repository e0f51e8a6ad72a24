//! Core data models for ws-echo.
//!
//! This crate provides the plain data types shared by the transport, the
//! connection panel, and the terminal front end: the connection lifecycle
//! state, the entries of the display log, and the status indicator derived
//! from the lifecycle.

pub mod message;
pub mod state;
pub mod status;

// Re-export main types
pub use message::{MessageDirection, MessageEntry};
pub use state::ConnectionState;
pub use status::{StatusClass, StatusIndicator, CONNECTING_LABEL, DISCONNECTED_LABEL};
