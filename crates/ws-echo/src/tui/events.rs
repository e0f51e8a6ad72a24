//! Terminal setup and the TUI event loop.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use echo_panel::ConnectionPanel;
use echo_transport::Transport;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::runtime::Runtime;
use tracing::{info, warn};

use super::app::App;
use super::ui;
use crate::error::Result;
use crate::peer::open_transport;

const TICK_RATE: Duration = Duration::from_millis(100);

/// How long quitting waits for the close handshake.
const CLOSE_GRACE: Duration = Duration::from_millis(500);

/// Initialize the terminal for TUI mode.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the TUI against `url` until the user quits.
pub fn run(url: &str, loopback: bool) -> Result<()> {
    // Socket I/O runs here; the panel stays on this thread
    let runtime = Runtime::new()?;
    let transport = open_transport(url, loopback, runtime.handle())?;

    let mut terminal = setup_terminal()?;
    let mut app = App::new(ConnectionPanel::initialize(transport));

    let result = run_loop(&mut terminal, &mut app);

    if !app.shutdown(CLOSE_GRACE) {
        warn!(address = %app.panel.address(), "connection still open at exit");
    }
    restore_terminal(&mut terminal)?;
    info!(entries = app.panel.log().len(), "tui closed");

    result
}

/// Main event loop.
fn run_loop<T: Transport>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<T>,
) -> Result<()> {
    loop {
        app.tick();

        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
