//! One-shot mode: connect, send one message, wait for the echo, close.

use std::io::Write;
use std::time::{Duration, Instant};

use echo_models::{MessageDirection, StatusClass};
use echo_panel::{ConnectionPanel, DisplayLog};
use echo_transport::Transport;
use tokio::runtime::Runtime;
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::peer::open_transport;

const PUMP_SLICE: Duration = Duration::from_millis(50);

/// Pump until `done` holds or `deadline` passes.
fn pump_until<T, F>(panel: &mut ConnectionPanel<T>, deadline: Instant, done: F) -> bool
where
    T: Transport,
    F: Fn(&ConnectionPanel<T>) -> bool,
{
    loop {
        if done(panel) {
            return true;
        }
        let now = Instant::now();
        if now >= deadline {
            return false;
        }
        panel.pump_timeout(PUMP_SLICE.min(deadline - now));
    }
}

/// Run one exchange over `transport` and return the panel once it has
/// closed.
///
/// Each phase (open, reply, close) gets its own `wait`. A missing reply is
/// not an error here: the caller decides what an empty exchange means.
pub fn exchange<T: Transport>(
    transport: T,
    message: &str,
    wait: Duration,
) -> Result<ConnectionPanel<T>> {
    let mut panel = ConnectionPanel::initialize(transport);

    let settled = pump_until(&mut panel, Instant::now() + wait, |p| {
        p.status().class != StatusClass::Connecting
    });
    if !settled {
        panel.request_close();
        return Err(AppError::Timeout {
            waiting_for: "the connection to open",
            waited: wait,
        });
    }
    if panel.is_closed() {
        return Err(AppError::ConnectFailed {
            address: panel.address().to_string(),
        });
    }

    panel.compose_mut().set(message);
    panel.submit();

    let replied = pump_until(&mut panel, Instant::now() + wait, |p| {
        p.is_closed() || p.log().count(MessageDirection::Received) > 0
    });
    if !replied {
        debug!(waited = ?wait, "no reply before deadline");
    }

    panel.request_close();
    if !pump_until(&mut panel, Instant::now() + wait, |p| p.is_closed()) {
        warn!(address = %panel.address(), "close did not complete in time");
    }

    Ok(panel)
}

/// Write the log as `Sent: ...` / `Received: ...` lines, or as JSON lines.
pub fn render(log: &DisplayLog, json: bool, out: &mut impl Write) -> Result<()> {
    for entry in log {
        if json {
            serde_json::to_writer(&mut *out, entry)?;
            writeln!(out)?;
        } else {
            writeln!(out, "{}", entry.display_line())?;
        }
    }
    Ok(())
}

/// Entry point for `ws-echo send`.
pub fn run(url: &str, loopback: bool, message: &str, wait: Duration, json: bool) -> Result<()> {
    let runtime = Runtime::new()?;
    let transport = open_transport(url, loopback, runtime.handle())?;

    let panel = exchange(transport, message, wait)?;

    let stdout = std::io::stdout();
    render(panel.log(), json, &mut stdout.lock())?;

    if panel.log().count(MessageDirection::Received) == 0 {
        return Err(AppError::Timeout {
            waiting_for: "a reply",
            waited: wait,
        });
    }
    Ok(())
}
