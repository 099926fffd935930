//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the central publish/subscribe hub for
//! [`BroadcastEvent`]s. It is designed to be shared via `Arc<EventBus>`
//! across the application; the real-time transport (WebSocket sessions,
//! push relays) subscribes and fans the envelopes out to clients by
//! channel name.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// BroadcastEvent
// ---------------------------------------------------------------------------

/// A channel-addressed wire envelope for one real-time event.
///
/// Built once by the typed constructors in
/// [`task_events`](crate::task_events), immutable afterwards, and
/// consumed by whatever transport subscribes to the bus. Subscribers on
/// `task.<id>` rely on the exact payload keys per event name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastEvent {
    /// Target channel, e.g. `"task.2"`.
    pub channel: String,

    /// Dot-separated event name, e.g. `"attachment.uploaded"`.
    pub event: String,

    /// JSON payload carrying the fields the channel consumer needs.
    pub payload: serde_json::Value,
}

impl BroadcastEvent {
    /// Assemble an envelope from its parts.
    pub fn new(
        channel: impl Into<String>,
        event: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            channel: channel.into(),
            event: event.into(),
            payload,
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`BroadcastEvent`].
///
/// # Usage
///
/// ```rust
/// use tavola_events::bus::{BroadcastEvent, EventBus};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(BroadcastEvent::new(
///     "task.2",
///     "attachment.uploaded",
///     serde_json::json!({}),
/// ));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<BroadcastEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped;
    /// each event is a fire-and-forget unit of work.
    pub fn publish(&self, event: BroadcastEvent) {
        // Ignore the SendError — it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Publish from bare parts, matching the dispatcher contract
    /// `publish(channelName, eventName, payload)`.
    pub fn publish_parts(
        &self,
        channel: impl Into<String>,
        event: impl Into<String>,
        payload: serde_json::Value,
    ) {
        self.publish(BroadcastEvent::new(channel, event, payload));
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<BroadcastEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        let event = BroadcastEvent::new(
            "task.42",
            "comment.deleted",
            serde_json::json!({"comment_id": 7, "task_id": 42}),
        );

        bus.publish(event);

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.channel, "task.42");
        assert_eq!(received.event, "comment.deleted");
        assert_eq!(received.payload["comment_id"], 7);
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish_parts("task.1", "attachment.deleted", serde_json::json!({}));

        let e1 = rx1.recv().await.expect("subscriber 1 should receive");
        let e2 = rx2.recv().await.expect("subscriber 2 should receive");

        assert_eq!(e1.event, "attachment.deleted");
        assert_eq!(e2.event, "attachment.deleted");
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::default();
        // No subscribers — this must not panic.
        bus.publish(BroadcastEvent::new("task.1", "orphan.event", serde_json::json!({})));
    }
}
