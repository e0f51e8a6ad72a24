//! WebSocket transport backed by tokio-tungstenite.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use echo_models::ConnectionState;
use futures_util::{SinkExt, StreamExt};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tracing::{debug, info};
use url::Url;

use crate::bus::{EventBus, Subscription};
use crate::error::{Result, TransportError};
use crate::event::ConnectionEvent;
use crate::transport::Transport;

/// Validate a peer address and return its normalized form.
///
/// Only `ws://` and `wss://` are accepted. Normalization follows the URL
/// standard, so `ws://echo.websocket.org` becomes `ws://echo.websocket.org/`.
pub fn normalize_url(raw: &str) -> Result<String> {
    let parsed = Url::parse(raw).map_err(|e| TransportError::InvalidUrl(format!("{}: {}", raw, e)))?;

    match parsed.scheme() {
        "ws" | "wss" => Ok(parsed.to_string()),
        other => Err(TransportError::InvalidUrl(format!(
            "unsupported scheme '{}' in {}",
            other, raw
        ))),
    }
}

/// Request sent from the handle to the connection task.
#[derive(Debug)]
enum Command {
    Text(String),
    Close,
}

/// State shared between the handle and the connection task.
struct Shared {
    state: RwLock<ConnectionState>,
    /// Present only while the connection is open.
    commands: Mutex<Option<mpsc::UnboundedSender<Command>>>,
    /// Set when `close` is called before the handshake finishes.
    close_requested: AtomicBool,
}

impl Shared {
    fn new() -> Self {
        Self {
            state: RwLock::new(ConnectionState::Connecting),
            commands: Mutex::new(None),
            close_requested: AtomicBool::new(false),
        }
    }

    fn state(&self) -> ConnectionState {
        self.state.read().map(|s| *s).unwrap_or(ConnectionState::Closed)
    }

    fn set_state(&self, state: ConnectionState) {
        if let Ok(mut guard) = self.state.write() {
            *guard = state;
        }
    }

    /// Publish the command channel and mark the connection open.
    ///
    /// Returns `false` if a close was requested during the handshake.
    fn install(&self, tx: mpsc::UnboundedSender<Command>) -> bool {
        let Ok(mut commands) = self.commands.lock() else {
            return false;
        };
        if self.close_requested.load(Ordering::SeqCst) {
            return false;
        }
        *commands = Some(tx);
        self.set_state(ConnectionState::Open);
        true
    }

    fn clear(&self) {
        if let Ok(mut commands) = self.commands.lock() {
            *commands = None;
        }
    }

    fn finish(&self, bus: &EventBus) {
        self.set_state(ConnectionState::Closed);
        bus.emit(ConnectionEvent::Closed);
    }

    fn finish_with_error(&self, bus: &EventBus, error: TransportError) {
        debug!(error = %error, "connection failed");
        self.set_state(ConnectionState::Errored);
        bus.emit(ConnectionEvent::Error(error));
        self.finish(bus);
    }
}

/// A WebSocket client for text messages.
///
/// The socket lives in a task spawned on the given tokio runtime. The handle
/// only forwards requests to that task, so every method returns immediately
/// and may be called from a thread outside the runtime.
///
/// # Example
///
/// ```no_run
/// use echo_transport::{Transport, WebSocketTransport};
///
/// let runtime = tokio::runtime::Runtime::new().unwrap();
/// let ws = WebSocketTransport::new("wss://echo.websocket.org", runtime.handle().clone()).unwrap();
/// let events = ws.subscribe();
/// ws.connect();
/// ```
pub struct WebSocketTransport {
    url: String,
    runtime: Handle,
    started: AtomicBool,
    shared: Arc<Shared>,
    bus: Arc<EventBus>,
}

impl WebSocketTransport {
    /// Create a transport for `url`. Nothing touches the network until
    /// [`connect`](Transport::connect) is called.
    pub fn new(url: &str, runtime: Handle) -> Result<Self> {
        let url = normalize_url(url)?;

        // Fails when a provider is already installed, which is fine.
        let _ = rustls::crypto::ring::default_provider().install_default();

        Ok(Self {
            url,
            runtime,
            started: AtomicBool::new(false),
            shared: Arc::new(Shared::new()),
            bus: Arc::new(EventBus::new()),
        })
    }
}

impl Transport for WebSocketTransport {
    fn url(&self) -> &str {
        &self.url
    }

    fn state(&self) -> ConnectionState {
        self.shared.state()
    }

    fn subscribe(&self) -> Subscription {
        self.bus.subscribe()
    }

    fn connect(&self) {
        if self.started.swap(true, Ordering::SeqCst) {
            return;
        }

        let url = self.url.clone();
        let shared = self.shared.clone();
        let bus = self.bus.clone();
        self.runtime.spawn(run_connection(url, shared, bus));
    }

    fn send(&self, text: &str) -> Result<()> {
        let commands = self
            .shared
            .commands
            .lock()
            .map_err(|_| TransportError::ChannelClosed)?;

        let state = self.shared.state();
        if !state.is_open() {
            return Err(TransportError::NotOpen(state));
        }

        match commands.as_ref() {
            Some(tx) => tx
                .send(Command::Text(text.to_string()))
                .map_err(|_| TransportError::ChannelClosed),
            None => Err(TransportError::NotOpen(state)),
        }
    }

    fn close(&self) {
        let Ok(commands) = self.shared.commands.lock() else {
            return;
        };

        if let Some(tx) = commands.as_ref() {
            if tx.send(Command::Close).is_err() {
                debug!("connection task already stopped");
            }
            return;
        }

        if self.shared.state() != ConnectionState::Connecting {
            return;
        }

        if !self.started.swap(true, Ordering::SeqCst) {
            // Never connected: there is no task to report the close.
            self.shared.finish(&self.bus);
            return;
        }

        debug!(url = %self.url, "close requested during handshake");
        self.shared.close_requested.store(true, Ordering::SeqCst);
    }
}

impl Drop for WebSocketTransport {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for WebSocketTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebSocketTransport")
            .field("url", &self.url)
            .field("state", &self.state())
            .finish()
    }
}

/// Drive one connection from handshake to close.
async fn run_connection(url: String, shared: Arc<Shared>, bus: Arc<EventBus>) {
    debug!(url = %url, "starting handshake");

    let mut ws_stream = match tokio_tungstenite::connect_async(url.as_str()).await {
        Ok((stream, response)) => {
            debug!(status = %response.status(), "handshake complete");
            stream
        }
        Err(e) => {
            shared.finish_with_error(&bus, TransportError::Handshake(e.to_string()));
            return;
        }
    };

    let (tx, mut rx) = mpsc::unbounded_channel::<Command>();
    if !shared.install(tx) {
        shared.set_state(ConnectionState::Closing);
        if let Err(e) = ws_stream.close(None).await {
            debug!(error = %e, "close after handshake failed");
        }
        shared.finish(&bus);
        return;
    }

    info!(url = %url, "connection open");
    bus.emit(ConnectionEvent::Opened { url: url.clone() });

    let (mut write, mut read) = ws_stream.split();
    let mut closing = false;
    let mut failure = None;

    loop {
        tokio::select! {
            cmd = rx.recv(), if !closing => {
                match cmd {
                    Some(Command::Text(text)) => {
                        if let Err(e) = write.send(Message::Text(text.into())).await {
                            failure = Some(TransportError::Protocol(e.to_string()));
                            break;
                        }
                    }
                    Some(Command::Close) | None => {
                        closing = true;
                        shared.set_state(ConnectionState::Closing);
                        let frame = CloseFrame {
                            code: CloseCode::Normal,
                            reason: "".into(),
                        };
                        if let Err(e) = write.send(Message::Close(Some(frame))).await {
                            debug!(error = %e, "close frame not sent");
                            break;
                        }
                    }
                }
            }

            msg = read.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        bus.emit(ConnectionEvent::Message(text.to_string()));
                    }
                    Some(Ok(Message::Binary(data))) => {
                        debug!(len = data.len(), "ignoring binary frame");
                    }
                    Some(Ok(Message::Close(frame))) => {
                        // tungstenite answers the close frame; the stream ends next
                        debug!(?frame, "peer sent close frame");
                    }
                    Some(Ok(_)) => {}
                    Some(Err(WsError::ConnectionClosed)) | Some(Err(WsError::AlreadyClosed)) | None => {
                        break;
                    }
                    Some(Err(e)) => {
                        failure = Some(TransportError::Protocol(e.to_string()));
                        break;
                    }
                }
            }
        }
    }

    shared.clear();
    info!(url = %url, "connection closed");

    match failure {
        Some(error) => shared.finish_with_error(&bus, error),
        None => shared.finish(&bus),
    }
}
