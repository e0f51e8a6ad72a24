//! ws-echo - a terminal client for WebSocket echo servers.
//!
//! This crate provides the command-line interface, the interactive TUI and
//! the one-shot `send` command. The connection logic itself lives in
//! `echo-panel` and `echo-transport`.

pub mod cli;
pub mod error;
pub mod peer;
pub mod send;
pub mod tui;

pub use error::{AppError, Result};
