//! ConnectionPanel - one connection reflected into view state.

use std::time::Duration;

use echo_models::{ConnectionState, MessageEntry, StatusIndicator};
use echo_transport::{ConnectionEvent, Subscription, Transport, TransportError};
use tracing::{debug, error, info, warn};

use crate::compose::ComposeField;
use crate::log::DisplayLog;

/// Binds a single text connection to a status indicator, a message log,
/// and a compose field.
///
/// The panel never tracks the connection on its own: the status only moves
/// when an open or close event is handled, errors are logged without
/// touching it, and nothing is retried or reconnected.
///
/// # Known gap
///
/// [`submit`](Self::submit) appends a sent entry whether or not the
/// transport accepted the text, so the log is not a delivery record. Failed
/// transmits show up only in the operational log.
pub struct ConnectionPanel<T: Transport> {
    transport: T,
    events: Subscription,
    /// Peer address, replaced by the transport's address on open
    address: String,
    /// Lifecycle as seen through handled events
    observed: ConnectionState,
    log: DisplayLog,
    compose: ComposeField,
}

impl<T: Transport> ConnectionPanel<T> {
    /// Take ownership of `transport`, subscribe to its events, and start the
    /// handshake.
    ///
    /// Subscription happens first, so the open event cannot be missed.
    pub fn initialize(transport: T) -> Self {
        let events = transport.subscribe();
        let address = transport.url().to_string();

        info!(address = %address, "connecting");
        transport.connect();

        Self {
            transport,
            events,
            address,
            observed: ConnectionState::Connecting,
            log: DisplayLog::new(),
            compose: ComposeField::new(),
        }
    }

    /// Route one event to its handler.
    pub fn handle_event(&mut self, event: ConnectionEvent) {
        debug!(kind = event.kind(), "handling event");
        match event {
            ConnectionEvent::Opened { url } => self.on_open(&url),
            ConnectionEvent::Message(payload) => self.on_message(payload),
            ConnectionEvent::Error(err) => self.on_error(&err),
            ConnectionEvent::Closed => self.on_close(),
        }
    }

    /// Handle every pending event without blocking.
    ///
    /// Returns the number of events handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.events.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Wait up to `timeout` for one event, then handle everything pending.
    pub fn pump_timeout(&mut self, timeout: Duration) -> usize {
        match self.events.recv_timeout(timeout) {
            Some(event) => {
                self.handle_event(event);
                1 + self.pump()
            }
            None => 0,
        }
    }

    /// The handshake completed.
    pub fn on_open(&mut self, url: &str) {
        self.address = url.to_string();
        self.observed = ConnectionState::Open;
        info!(address = %self.address, "connected");
    }

    /// The transport reported an error. Logged only.
    pub fn on_error(&mut self, err: &TransportError) {
        error!(address = %self.address, error = %err, "WebSocket error");
    }

    /// The peer sent `payload`.
    pub fn on_message(&mut self, payload: impl Into<String>) {
        self.log.push(MessageEntry::received(payload));
    }

    /// Send the compose text, log it as sent, and clear the field.
    ///
    /// Empty text is sent like any other. The sent entry is appended even
    /// when the transport refuses the text.
    pub fn submit(&mut self) {
        let text = self.compose.text().to_string();

        if let Err(err) = self.transport.send(&text) {
            warn!(error = %err, state = %self.transport.state(), "message not transmitted");
        }

        self.log.push(MessageEntry::sent(text.clone()));
        self.compose.remember(&text);
        self.compose.clear();
    }

    /// The connection is finished.
    pub fn on_close(&mut self) {
        self.observed = ConnectionState::Closed;
        info!(address = %self.address, "disconnected");
    }

    /// Ask the transport to close. The status changes only once the close
    /// event is handled.
    pub fn request_close(&mut self) {
        info!(address = %self.address, "close requested");
        self.transport.close();
    }

    /// Peer address shown in the status.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Live state of the underlying transport.
    pub fn connection_state(&self) -> ConnectionState {
        self.transport.state()
    }

    /// Whether the close event has been handled.
    pub fn is_closed(&self) -> bool {
        self.observed.is_closed()
    }

    /// Current status indicator.
    pub fn status(&self) -> StatusIndicator {
        StatusIndicator::for_state(self.observed, &self.address)
    }

    /// The message log.
    pub fn log(&self) -> &DisplayLog {
        &self.log
    }

    /// The compose field.
    pub fn compose(&self) -> &ComposeField {
        &self.compose
    }

    /// Mutable access to the compose field, for key handling.
    pub fn compose_mut(&mut self) -> &mut ComposeField {
        &mut self.compose
    }

    /// The owned transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T: Transport> std::fmt::Debug for ConnectionPanel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionPanel")
            .field("address", &self.address)
            .field("observed", &self.observed)
            .field("entries", &self.log.len())
            .finish()
    }
}
