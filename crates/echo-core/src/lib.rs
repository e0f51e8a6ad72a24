//! ws-echo core - configuration and logging shared by every front end.
//!
//! - **config**: state directory layout, `.env.local` loading, peer URL
//! - **logging**: tracing subscriber setup for stderr or a log file

pub mod config;
pub mod error;
pub mod logging;

pub use config::{peer_url, state_dir, Paths, DEFAULT_PEER_URL, STATE_DIR_ENV, URL_ENV};
pub use error::{ConfigError, Result};
pub use logging::{init_logging, LogTarget};
