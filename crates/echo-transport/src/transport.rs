//! The transport abstraction the connection panel is written against.

use echo_models::ConnectionState;

use crate::bus::Subscription;
use crate::error::Result;

/// A full-duplex text-message channel to one fixed peer.
///
/// Implementations run their I/O elsewhere and report everything through
/// subscriptions: `connect`, `send`, and `close` return immediately and their
/// outcome is observed later as [`ConnectionEvent`](crate::ConnectionEvent)s.
pub trait Transport {
    /// Normalized peer address.
    fn url(&self) -> &str;

    /// Current lifecycle state.
    fn state(&self) -> ConnectionState;

    /// Registers a new listener for lifecycle events.
    fn subscribe(&self) -> Subscription;

    /// Starts the handshake. Calling it again is a no-op.
    fn connect(&self);

    /// Queues `text` for transmission.
    ///
    /// Fails with [`TransportError::NotOpen`](crate::TransportError::NotOpen)
    /// unless the state is `Open`. Nothing is buffered for later.
    fn send(&self, text: &str) -> Result<()>;

    /// Requests closure. The `Closed` event arrives asynchronously.
    fn close(&self);
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn url(&self) -> &str {
        (**self).url()
    }

    fn state(&self) -> ConnectionState {
        (**self).state()
    }

    fn subscribe(&self) -> Subscription {
        (**self).subscribe()
    }

    fn connect(&self) {
        (**self).connect()
    }

    fn send(&self, text: &str) -> Result<()> {
        (**self).send(text)
    }

    fn close(&self) {
        (**self).close()
    }
}
