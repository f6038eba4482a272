//! Listener registry for notification events delivered by the platform.
//!
//! The platform pushes events into a [`NotificationCenter`]; screens subscribe to
//! them with closures and receive a [`Subscription`] handle. Dropping the handle
//! unregisters the listener, so a screen that is torn down and mounted again
//! never receives the same event twice.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use dashmap::DashMap;
use tracing::debug;

use crate::types::{NotificationContent, NotificationResponse};

type ReceivedListener = Arc<dyn Fn(&NotificationContent) + Send + Sync>;
type ResponseListener = Arc<dyn Fn(&NotificationResponse) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListenerKind {
    Received,
    Response,
}

#[derive(Default)]
struct Listeners {
    next_id: AtomicU64,
    received: DashMap<u64, ReceivedListener>,
    responses: DashMap<u64, ResponseListener>,
}

impl Listeners {
    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    fn remove(&self, kind: ListenerKind, id: u64) -> bool {
        match kind {
            ListenerKind::Received => self.received.remove(&id).is_some(),
            ListenerKind::Response => self.responses.remove(&id).is_some(),
        }
    }
}

/// Event hub for incoming notifications and user responses.
///
/// Cloning is cheap; clones share the same listeners.
#[derive(Clone, Default)]
pub struct NotificationCenter {
    listeners: Arc<Listeners>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen for notifications that arrive while the app is running.
    pub fn add_notification_received_listener<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&NotificationContent) + Send + Sync + 'static,
    {
        let id = self.listeners.next_id();
        self.listeners.received.insert(id, Arc::new(listener));
        debug!(subscription = id, "Added notification received listener");
        Subscription::new(id, ListenerKind::Received, &self.listeners)
    }

    /// Listen for the user interacting with a delivered notification.
    pub fn add_notification_response_received_listener<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&NotificationResponse) + Send + Sync + 'static,
    {
        let id = self.listeners.next_id();
        self.listeners.responses.insert(id, Arc::new(listener));
        debug!(subscription = id, "Added notification response listener");
        Subscription::new(id, ListenerKind::Response, &self.listeners)
    }

    /// Deliver a received notification. Returns the number of listeners invoked.
    pub fn emit_received(&self, notification: &NotificationContent) -> usize {
        // Snapshot first so a listener may drop its own subscription.
        let listeners: Vec<ReceivedListener> = self
            .listeners
            .received
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        for listener in &listeners {
            listener(notification);
        }
        listeners.len()
    }

    /// Deliver a notification response. Returns the number of listeners invoked.
    pub fn emit_response(&self, response: &NotificationResponse) -> usize {
        let listeners: Vec<ResponseListener> = self
            .listeners
            .responses
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        for listener in &listeners {
            listener(response);
        }
        listeners.len()
    }

    /// Total number of live listeners of both kinds.
    pub fn listener_count(&self) -> usize {
        self.listeners.received.len() + self.listeners.responses.len()
    }
}

impl std::fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("received", &self.listeners.received.len())
            .field("responses", &self.listeners.responses.len())
            .finish()
    }
}

/// Handle to a registered listener. The listener is removed when this is dropped.
#[must_use = "dropping a Subscription removes the listener immediately"]
pub struct Subscription {
    id: u64,
    kind: ListenerKind,
    listeners: Weak<Listeners>,
}

impl Subscription {
    fn new(id: u64, kind: ListenerKind, listeners: &Arc<Listeners>) -> Self {
        Self {
            id,
            kind,
            listeners: Arc::downgrade(listeners),
        }
    }

    /// Remove the listener now.
    pub fn remove(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade()
            && listeners.remove(self.kind, self.id)
        {
            debug!(subscription = self.id, kind = ?self.kind, "Removed notification listener");
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;

    fn content(title: &str) -> NotificationContent {
        NotificationContent::new("n-1", Some(title.to_string()), None)
    }

    #[test]
    fn test_received_listener_gets_events() {
        let center = NotificationCenter::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let _sub = center.add_notification_received_listener(move |n| {
            sink.lock().unwrap().push(n.title.clone());
        });

        assert_eq!(center.emit_received(&content("one")), 1);
        assert_eq!(center.emit_received(&content("two")), 1);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![Some("one".to_string()), Some("two".to_string())]
        );
    }

    #[test]
    fn test_dropping_subscription_stops_delivery() {
        let center = NotificationCenter::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let sub = center.add_notification_received_listener(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        center.emit_received(&content("a"));
        drop(sub);
        assert_eq!(center.emit_received(&content("b")), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(center.listener_count(), 0);
    }

    #[test]
    fn test_response_and_received_are_independent() {
        let center = NotificationCenter::new();
        let received = center.add_notification_received_listener(|_| {});
        let response = center.add_notification_response_received_listener(|_| {});
        assert_eq!(center.listener_count(), 2);

        let tapped = NotificationResponse::tapped(content("x"));
        assert_eq!(center.emit_response(&tapped), 1);

        received.remove();
        assert_eq!(center.listener_count(), 1);
        assert_eq!(center.emit_response(&tapped), 1);
        drop(response);
        assert_eq!(center.listener_count(), 0);
    }

    #[test]
    fn test_clones_share_listeners() {
        let center = NotificationCenter::new();
        let other = center.clone();
        let _sub = center.add_notification_received_listener(|_| {});
        assert_eq!(other.emit_received(&content("a")), 1);
    }

    #[test]
    fn test_subscription_outliving_center_is_harmless() {
        let center = NotificationCenter::new();
        let sub = center.add_notification_received_listener(|_| {});
        drop(center);
        drop(sub);
    }

    #[test]
    fn test_listener_may_drop_its_own_subscription() {
        let center = NotificationCenter::new();
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let inner = slot.clone();
        let sub = center.add_notification_received_listener(move |_| {
            inner.lock().unwrap().take();
        });
        *slot.lock().unwrap() = Some(sub);

        assert_eq!(center.emit_received(&content("a")), 1);
        assert_eq!(center.listener_count(), 0);
    }
}
