//! ws-echo entry point.

use clap::Parser;
use echo_core::{init_logging, peer_url, LogTarget, Paths};

use ws_echo::cli::{Cli, Commands};
use ws_echo::{send, tui, Result};

fn main() {
    // Load .env.local from the working directory if it exists
    let _ = dotenvy::from_filename(".env.local");

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let paths = Paths::new(cli.state_dir());
    paths.load_env_file()?;

    let url = peer_url(cli.url.as_deref());
    let level = cli.log_level();

    match cli.command {
        None | Some(Commands::Tui) => {
            // The terminal belongs to the TUI, so logs go to a file
            paths.ensure_logs_dir()?;
            init_logging(level, &LogTarget::File(paths.log_file()))?;
            tui::run(&url, cli.loopback)
        }
        Some(Commands::Send { message, json, wait }) => {
            init_logging(level, &LogTarget::Stderr)?;
            send::run(&url, cli.loopback, &message, wait, json)
        }
    }
}
