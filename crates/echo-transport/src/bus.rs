//! EventBus - fan-out of connection events to subscribers.
//!
//! Each subscriber owns one end of an `mpsc` channel and the bus keeps the
//! sending ends. Dropping a [`Subscription`] unregisters it: the dead sender
//! is pruned on the next emit.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::RwLock;
use std::time::Duration;

use tracing::trace;

use crate::event::ConnectionEvent;

/// Broadcasts [`ConnectionEvent`]s to every live subscriber.
///
/// Emission order is preserved per subscriber. Emitting never blocks, so the
/// bus can be fed from inside an async task.
#[derive(Debug, Default)]
pub struct EventBus {
    /// Sending ends of all subscriber channels.
    subscribers: RwLock<Vec<Sender<ConnectionEvent>>>,
}

impl EventBus {
    /// Creates a bus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new subscriber.
    ///
    /// The subscription only sees events emitted after this call.
    pub fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::channel();

        if let Ok(mut subs) = self.subscribers.write() {
            subs.push(tx);
        }

        Subscription { rx }
    }

    /// Sends `event` to every subscriber, dropping the ones that went away.
    pub fn emit(&self, event: ConnectionEvent) {
        if let Ok(mut subs) = self.subscribers.write() {
            subs.retain(|tx| tx.send(event.clone()).is_ok());
            trace!(kind = event.kind(), subscribers = subs.len(), "event emitted");
        }
    }

    /// Number of registered subscribers.
    ///
    /// Subscriptions dropped since the last emit are still counted.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().map(|subs| subs.len()).unwrap_or(0)
    }
}

/// Receiving end of an [`EventBus`] registration.
#[derive(Debug)]
pub struct Subscription {
    rx: Receiver<ConnectionEvent>,
}

impl Subscription {
    /// Returns the next pending event without blocking.
    pub fn try_recv(&self) -> Option<ConnectionEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Waits up to `timeout` for the next event.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<ConnectionEvent> {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Blocks until the next event, or returns `None` once the bus is gone.
    pub fn recv(&self) -> Option<ConnectionEvent> {
        self.rx.recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;

    #[test]
    fn test_every_subscriber_sees_every_event_in_order() {
        let bus = EventBus::new();
        let first = bus.subscribe();
        let second = bus.subscribe();

        bus.emit(ConnectionEvent::Message("a".into()));
        bus.emit(ConnectionEvent::Message("b".into()));
        bus.emit(ConnectionEvent::Closed);

        for sub in [&first, &second] {
            assert_eq!(sub.try_recv(), Some(ConnectionEvent::Message("a".into())));
            assert_eq!(sub.try_recv(), Some(ConnectionEvent::Message("b".into())));
            assert_eq!(sub.try_recv(), Some(ConnectionEvent::Closed));
            assert_eq!(sub.try_recv(), None);
        }
    }

    #[test]
    fn test_late_subscriber_misses_earlier_events() {
        let bus = EventBus::new();
        bus.emit(ConnectionEvent::Message("early".into()));

        let late = bus.subscribe();
        assert_eq!(late.try_recv(), None);

        bus.emit(ConnectionEvent::Error(TransportError::ChannelClosed));
        assert_eq!(
            late.try_recv(),
            Some(ConnectionEvent::Error(TransportError::ChannelClosed))
        );
    }

    #[test]
    fn test_dropped_subscription_is_pruned() {
        let bus = EventBus::new();
        let kept = bus.subscribe();
        let dropped = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        drop(dropped);
        bus.emit(ConnectionEvent::Closed);

        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(kept.try_recv(), Some(ConnectionEvent::Closed));
    }

    #[test]
    fn test_recv_timeout_returns_none_when_idle() {
        let bus = EventBus::new();
        let sub = bus.subscribe();
        assert_eq!(sub.recv_timeout(Duration::from_millis(10)), None);
    }

    #[test]
    fn test_recv_ends_when_bus_is_dropped() {
        let bus = EventBus::new();
        let sub = bus.subscribe();

        bus.emit(ConnectionEvent::Closed);
        drop(bus);

        assert_eq!(sub.recv(), Some(ConnectionEvent::Closed));
        assert_eq!(sub.recv(), None);
    }

    #[test]
    fn test_events_cross_threads() {
        let bus = std::sync::Arc::new(EventBus::new());
        let sub = bus.subscribe();

        let producer = bus.clone();
        std::thread::spawn(move || {
            producer.emit(ConnectionEvent::Message("from thread".into()));
        })
        .join()
        .unwrap();

        assert_eq!(
            sub.recv_timeout(Duration::from_secs(1)),
            Some(ConnectionEvent::Message("from thread".into()))
        );
    }
}
