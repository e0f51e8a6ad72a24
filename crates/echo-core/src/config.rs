//! Shared configuration for ws-echo.
//!
//! # Storage Structure
//!
//! ```text
//! ~/.ws-echo/
//! ├── config/       # .env.local with user settings
//! └── logs/         # ws-echo.log written by the TUI
//! ```
//!
//! # Environment Variables
//!
//! - `WS_ECHO_STATE_DIR`: Override the base state directory
//! - `WS_ECHO_URL`: Peer address used when `--url` is not given

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConfigError, Result};

/// Environment variable for custom state directory.
pub const STATE_DIR_ENV: &str = "WS_ECHO_STATE_DIR";

/// Environment variable for the peer address.
pub const URL_ENV: &str = "WS_ECHO_URL";

/// Public echo server used when nothing else is configured.
pub const DEFAULT_PEER_URL: &str = "ws://echo.websocket.org";

/// Default state directory name under home.
const DEFAULT_STATE_DIR: &str = ".ws-echo";

const LOGS_SUBDIR: &str = "logs";
const CONFIG_SUBDIR: &str = "config";
const LOG_FILE: &str = "ws-echo.log";
const ENV_FILE: &str = ".env.local";

/// Get the default state directory.
///
/// Resolution order:
/// 1. `WS_ECHO_STATE_DIR` environment variable if set
/// 2. `~/.ws-echo` if home directory is available
/// 3. `.ws-echo` in current directory as fallback
pub fn state_dir() -> PathBuf {
    std::env::var(STATE_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .map(|h| h.join(DEFAULT_STATE_DIR))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
        })
}

/// Pick the peer address: explicit value, then `WS_ECHO_URL`, then the
/// public echo server.
pub fn peer_url(explicit: Option<&str>) -> String {
    explicit
        .map(str::to_string)
        .or_else(|| std::env::var(URL_ENV).ok().filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_PEER_URL.to_string())
}

/// File locations under one state directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    root: PathBuf,
}

impl Paths {
    /// Lay out paths under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The state directory itself.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory for log files.
    pub fn logs_dir(&self) -> PathBuf {
        self.root.join(LOGS_SUBDIR)
    }

    /// Directory for user configuration.
    pub fn config_dir(&self) -> PathBuf {
        self.root.join(CONFIG_SUBDIR)
    }

    /// The TUI log file.
    pub fn log_file(&self) -> PathBuf {
        self.logs_dir().join(LOG_FILE)
    }

    /// The `.env.local` settings file.
    pub fn env_file(&self) -> PathBuf {
        self.config_dir().join(ENV_FILE)
    }

    /// Ensure the logs directory exists.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn ensure_logs_dir(&self) -> Result<()> {
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }

    /// Load `.env.local` into the process environment if it exists.
    ///
    /// Variables already set are left alone. Returns whether a file was read.
    pub fn load_env_file(&self) -> Result<bool> {
        let path = self.env_file();
        if !path.exists() {
            return Ok(false);
        }

        dotenvy::from_path(&path).map_err(|e| ConfigError::EnvFile {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), "loaded env file");
        Ok(true)
    }
}
