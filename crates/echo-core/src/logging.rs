//! Tracing subscriber setup.
//!
//! The TUI owns the terminal, so it logs to a file; one-shot commands log
//! to stderr. `RUST_LOG` overrides the verbosity-derived level either way.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error, with ANSI colors.
    Stderr,
    /// Appended to a file, without colors.
    File(PathBuf),
}

/// Filter from `RUST_LOG`, falling back to `level`.
pub fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()))
}

/// Open `path` for appending, creating missing parent directories.
pub fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(file)
}

/// Install the global subscriber.
///
/// # Errors
/// Fails if the log file cannot be opened or a subscriber is already set.
pub fn init_logging(level: Level, target: &LogTarget) -> Result<()> {
    let filter = env_filter(level);

    let installed = match target {
        LogTarget::Stderr => fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init(),
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    installed.map_err(|e| ConfigError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_log_file_creates_parents_and_appends() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("logs").join("ws-echo.log");

        {
            use std::io::Write;
            let mut file = open_log_file(&path).unwrap();
            writeln!(file, "one").unwrap();
        }
        {
            use std::io::Write;
            let mut file = open_log_file(&path).unwrap();
            writeln!(file, "two").unwrap();
        }

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_open_log_file_in_unwritable_location_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let result = open_log_file(&blocker.join("ws-echo.log"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
