//! Terminal User Interface for ws-echo.
//!
//! Provides a single-screen TUI with:
//! - Header showing the peer address
//! - Status line colored by connection state
//! - Scrollable message list
//! - Input box for the message to send
//! - Footer with keybindings

mod app;
mod events;
mod scroll;
mod ui;

pub use app::{App, PAGE_SIZE};
pub use events::run;
