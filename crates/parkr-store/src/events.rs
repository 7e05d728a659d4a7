//! Change notifications.
//!
//! Every mutating store operation publishes a [`StoreEvent`] on the store's
//! [`EventBus`]. Views that display store data call
//! [`Store::subscribe`](crate::Store::subscribe) and re-read the affected
//! collection when an event arrives. Delivery happens after the write has
//! completed; there is no ordering guarantee beyond that.

use serde::Serialize;
use tokio::sync::broadcast;

/// Buffered events per subscriber before the slowest one starts lagging.
const EVENT_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StoreEvent {
    /// The audit log changed.
    AuditUpdated,
    /// The user collection changed.
    UsersUpdated,
    /// A system message was delivered to the inbox.
    NewMail,
}

impl StoreEvent {
    /// Stable event name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AuditUpdated => "parkr_audit_update",
            Self::UsersUpdated => "parkr_users_updated",
            Self::NewMail => "parkr_new_mail",
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<StoreEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self { tx }
    }

    /// Register a listener. It sees every event emitted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.tx.subscribe()
    }

    /// Publish `event` to all current listeners. No listeners is fine.
    pub fn emit(&self, event: StoreEvent) {
        match self.tx.send(event) {
            Ok(listeners) => tracing::trace!(event = event.name(), listeners, "store event"),
            Err(_) => tracing::trace!(event = event.name(), "store event with no listeners"),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    #[test]
    fn emit_without_listeners_is_silent() {
        let bus = EventBus::new();
        bus.emit(StoreEvent::UsersUpdated);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn listeners_receive_in_order() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.emit(StoreEvent::AuditUpdated);
        bus.emit(StoreEvent::UsersUpdated);

        assert_eq!(rx.try_recv(), Ok(StoreEvent::AuditUpdated));
        assert_eq!(rx.try_recv(), Ok(StoreEvent::UsersUpdated));
        assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn event_names() {
        assert_eq!(StoreEvent::AuditUpdated.name(), "parkr_audit_update");
        assert_eq!(StoreEvent::UsersUpdated.name(), "parkr_users_updated");
        assert_eq!(StoreEvent::NewMail.name(), "parkr_new_mail");
    }
}
