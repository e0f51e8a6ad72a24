//! Text-message transports for ws-echo.
//!
//! A transport is a full-duplex text channel to one fixed peer. It exposes
//! `connect`, `send`, and `close`, and reports its lifecycle through an
//! [`EventBus`]: every subscriber gets its own [`Subscription`] and sees the
//! same events in the same order.
//!
//! # Example
//!
//! ```no_run
//! use echo_transport::{ConnectionEvent, Transport, WebSocketTransport};
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let transport = WebSocketTransport::new("ws://echo.websocket.org", runtime.handle().clone()).unwrap();
//!
//! // Subscribe before connecting so no event is missed
//! let events = transport.subscribe();
//! transport.connect();
//!
//! if let Some(ConnectionEvent::Opened { url }) = events.recv() {
//!     println!("connected to {}", url);
//!     transport.send("hello").unwrap();
//! }
//! ```

pub mod bus;
pub mod error;
pub mod event;
pub mod loopback;
pub mod transport;
pub mod websocket;

pub use bus::{EventBus, Subscription};
pub use error::{Result, TransportError};
pub use event::ConnectionEvent;
pub use loopback::LoopbackTransport;
pub use transport::Transport;
pub use websocket::{normalize_url, WebSocketTransport};
