//! Change notifier: fans commit notifications out to subscription queues.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_stream::stream;
use futures_util::Stream;
use medgraph_core::events::{CommitEvent, CommitHook};
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, trace};

use super::events::{EventKind, NotificationEvent};

/// Queues registered for a single event kind.
#[derive(Debug, Default)]
struct KindRegistry {
    senders: Mutex<HashMap<u64, mpsc::UnboundedSender<String>>>,
}

/// Registry of per-subscription queues, keyed by event kind.
///
/// Each kind has its own lock, so traffic on one kind never contends with
/// another. Queues are unbounded and strictly FIFO: a queue sees messages
/// in the order [`publish`](Self::publish) was called for its kind.
///
/// The notifier is also a [`CommitHook`]: registered on the store, it turns
/// every patient or doctor commit into a notification.
#[derive(Debug)]
pub struct ChangeNotifier {
    registries: [Arc<KindRegistry>; 4],
    next_id: AtomicU64,
}

impl ChangeNotifier {
    /// Create a notifier with no registered queues.
    pub fn new() -> Self {
        Self {
            registries: Default::default(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Create a new notifier wrapped in an Arc for sharing.
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    fn registry(&self, kind: EventKind) -> &Arc<KindRegistry> {
        &self.registries[kind.index()]
    }

    /// Registers a fresh, empty queue for `kind`.
    ///
    /// Only messages published after this call reach the queue. Dropping
    /// the returned queue unregisters it.
    pub fn register(&self, kind: EventKind) -> SubscriptionQueue {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = mpsc::unbounded_channel();
        let registry = self.registry(kind).clone();
        registry.senders.lock().insert(id, sender);
        debug!(kind = %kind, queue = id, "Registered subscription queue");

        SubscriptionQueue {
            id,
            kind,
            receiver,
            registry,
        }
    }

    /// Delivers `event` to every queue registered for its kind.
    ///
    /// Returns the number of queues that received the message. Queues
    /// whose receiving side is gone are pruned.
    pub fn publish(&self, event: NotificationEvent) -> usize {
        let kind = event.kind();
        let message = event.into_message();
        let mut senders = self.registry(kind).senders.lock();

        let before = senders.len();
        senders.retain(|_, sender| sender.send(message.clone()).is_ok());
        let delivered = senders.len();

        if delivered < before {
            trace!(kind = %kind, pruned = before - delivered, "Pruned closed queues");
        }
        trace!(kind = %kind, delivered, "Published notification");
        delivered
    }

    /// Number of queues currently registered for `kind`.
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.registry(kind).senders.lock().len()
    }

    /// Registers a queue for `kind` and returns it as a stream of messages.
    ///
    /// Registration happens immediately, not on first poll. The stream
    /// never ends on its own; dropping it releases the registration.
    pub fn subscribe(&self, kind: EventKind) -> impl Stream<Item = String> + Send + use<> {
        let mut queue = self.register(kind);
        stream! {
            while let Some(message) = queue.recv().await {
                yield message;
            }
        }
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitHook for ChangeNotifier {
    fn name(&self) -> &str {
        "change_notifier"
    }

    fn on_commit(&self, event: &CommitEvent) {
        let Some(notification) = NotificationEvent::from_commit(event) else {
            return;
        };
        let kind = notification.kind();
        let delivered = self.publish(notification);
        debug!(
            kind = %kind,
            entity_id = %event.entity.id(),
            delivered,
            "Notified subscribers"
        );
    }
}

/// A registered per-subscription queue.
///
/// Dropping the queue removes it from the notifier.
#[derive(Debug)]
pub struct SubscriptionQueue {
    id: u64,
    kind: EventKind,
    receiver: mpsc::UnboundedReceiver<String>,
    registry: Arc<KindRegistry>,
}

impl SubscriptionQueue {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Waits for the next message.
    pub async fn recv(&mut self) -> Option<String> {
        self.receiver.recv().await
    }

    /// Takes a message if one is already queued.
    pub fn try_recv(&mut self) -> Option<String> {
        self.receiver.try_recv().ok()
    }
}

impl Drop for SubscriptionQueue {
    fn drop(&mut self) {
        self.registry.senders.lock().remove(&self.id);
        debug!(kind = %self.kind, queue = self.id, "Unregistered subscription queue");
    }
}
