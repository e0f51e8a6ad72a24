//! In-process transport that echoes text back to the sender.
//!
//! Used for offline runs and for driving the connection panel in tests: the
//! peer side can be scripted with [`LoopbackTransport::inject_message`],
//! [`LoopbackTransport::inject_error`] and [`LoopbackTransport::peer_close`].
//! Clones share the same connection, so a test can keep one clone as the
//! "peer" while the panel owns another.

use std::sync::{Arc, Mutex, MutexGuard};

use echo_models::ConnectionState;
use tracing::debug;

use crate::bus::{EventBus, Subscription};
use crate::error::{Result, TransportError};
use crate::event::ConnectionEvent;
use crate::transport::Transport;
use crate::websocket::normalize_url;

#[derive(Debug)]
struct LoopbackInner {
    state: ConnectionState,
    started: bool,
    hold_handshake: bool,
    echo: bool,
    sent: Vec<String>,
    close_requests: usize,
}

/// A transport whose peer lives in the same process.
#[derive(Debug, Clone)]
pub struct LoopbackTransport {
    url: String,
    inner: Arc<Mutex<LoopbackInner>>,
    bus: Arc<EventBus>,
}

impl LoopbackTransport {
    /// Create a loopback connection that opens as soon as `connect` is called
    /// and echoes every text it is sent.
    ///
    /// The address is normalized when it parses and kept verbatim otherwise,
    /// since no socket is ever opened. Callers that take user input should
    /// check it with [`normalize_url`] first.
    pub fn new(url: &str) -> Self {
        Self {
            url: normalize_url(url).unwrap_or_else(|_| url.to_string()),
            inner: Arc::new(Mutex::new(LoopbackInner {
                state: ConnectionState::Connecting,
                started: false,
                hold_handshake: false,
                echo: true,
                sent: Vec::new(),
                close_requests: 0,
            })),
            bus: Arc::new(EventBus::new()),
        }
    }

    /// Keep the connection in `Connecting` until
    /// [`complete_handshake`](Self::complete_handshake) is called.
    pub fn hold_handshake(self) -> Self {
        self.inner().hold_handshake = true;
        self
    }

    /// Accept sends without echoing them back.
    pub fn without_echo(self) -> Self {
        self.inner().echo = false;
        self
    }

    /// Finish a held handshake.
    pub fn complete_handshake(&self) {
        let opened = {
            let mut inner = self.inner();
            if inner.state == ConnectionState::Connecting {
                inner.state = ConnectionState::Open;
                true
            } else {
                false
            }
        };
        if opened {
            self.bus.emit(ConnectionEvent::Opened {
                url: self.url.clone(),
            });
        }
    }

    /// Deliver `text` as if the peer had sent it.
    pub fn inject_message(&self, text: impl Into<String>) {
        if self.inner().state.is_open() {
            self.bus.emit(ConnectionEvent::Message(text.into()));
        }
    }

    /// Report a transport error. The connection is left errored; call
    /// [`peer_close`](Self::peer_close) to finish it.
    pub fn inject_error(&self, detail: impl Into<String>) {
        self.inner().state = ConnectionState::Errored;
        self.bus
            .emit(ConnectionEvent::Error(TransportError::Protocol(detail.into())));
    }

    /// Close the connection from the peer side.
    pub fn peer_close(&self) {
        let closed = {
            let mut inner = self.inner();
            if inner.state.is_closed() {
                false
            } else {
                inner.state = ConnectionState::Closed;
                true
            }
        };
        if closed {
            self.bus.emit(ConnectionEvent::Closed);
        }
    }

    /// Every text accepted by `send`, in order.
    pub fn sent(&self) -> Vec<String> {
        self.inner().sent.clone()
    }

    /// How many times `close` was called.
    pub fn close_requests(&self) -> usize {
        self.inner().close_requests
    }

    fn inner(&self) -> MutexGuard<'_, LoopbackInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Transport for LoopbackTransport {
    fn url(&self) -> &str {
        &self.url
    }

    fn state(&self) -> ConnectionState {
        self.inner().state
    }

    fn subscribe(&self) -> Subscription {
        self.bus.subscribe()
    }

    fn connect(&self) {
        let hold = {
            let mut inner = self.inner();
            if inner.started {
                return;
            }
            inner.started = true;
            inner.hold_handshake
        };
        if !hold {
            self.complete_handshake();
        }
    }

    fn send(&self, text: &str) -> Result<()> {
        let echo = {
            let mut inner = self.inner();
            if !inner.state.is_open() {
                return Err(TransportError::NotOpen(inner.state));
            }
            inner.sent.push(text.to_string());
            inner.echo
        };
        if echo {
            self.bus.emit(ConnectionEvent::Message(text.to_string()));
        }
        Ok(())
    }

    fn close(&self) {
        let closed = {
            let mut inner = self.inner();
            inner.close_requests += 1;
            match inner.state {
                ConnectionState::Connecting | ConnectionState::Open => {
                    inner.state = ConnectionState::Closed;
                    true
                }
                _ => false,
            }
        };
        if closed {
            debug!(url = %self.url, "loopback closed");
            self.bus.emit(ConnectionEvent::Closed);
        }
    }
}
