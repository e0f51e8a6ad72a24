//! Command-line interface definition using clap.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

/// ws-echo - talk to a WebSocket echo server from the terminal
#[derive(Parser, Debug)]
#[command(name = "ws-echo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to state directory
    #[arg(short, long, env = "WS_ECHO_STATE_DIR", global = true)]
    pub state_dir: Option<PathBuf>,

    /// Peer address (ws:// or wss://); falls back to WS_ECHO_URL
    #[arg(short, long, global = true)]
    pub url: Option<String>,

    /// Use an in-process echo peer instead of the network
    #[arg(long, global = true)]
    pub loopback: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Launch the interactive panel (default)
    Tui,

    /// Send one message, wait for the echo, and print the log
    Send {
        /// Message to send
        #[arg(required = true)]
        message: String,

        /// Print entries as JSON lines
        #[arg(long)]
        json: bool,

        /// How long to wait for each step (e.g. 5s, 500ms)
        #[arg(short, long, default_value = "5s", value_parser = humantime::parse_duration)]
        wait: Duration,
    },
}

impl Cli {
    /// Returns the state directory path, using default if not specified.
    pub fn state_dir(&self) -> PathBuf {
        self.state_dir.clone().unwrap_or_else(echo_core::state_dir)
    }

    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
