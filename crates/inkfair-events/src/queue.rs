//! Queue boundary for deferred delivery.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use uuid::Uuid;

use inkfair_core::error::DomainError;
use inkfair_core::event::DomainEvent;

use crate::dispatch::DeferredDispatcher;

/// Serializable envelope for one queued event delivery.
///
/// This is the only artifact crossing the process boundary from the event
/// core. Its field set must stay stable so a worker can safely re-consume
/// deliveries enqueued by an older process after a crash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Symbolic event name.
    pub name: String,
    /// Timestamp of event creation.
    pub occurred_at: DateTime<Utc>,
    /// Event-kind-specific payload.
    pub payload: serde_json::Value,
}

impl EventEnvelope {
    /// Wraps an event for transport.
    #[must_use]
    pub fn from_event(event: &DomainEvent) -> Self {
        Self {
            event_id: event.event_id,
            name: event.name.clone(),
            occurred_at: event.occurred_at,
            payload: event.payload.clone(),
        }
    }

    /// Unwraps the transported event on the worker side.
    #[must_use]
    pub fn into_event(self) -> DomainEvent {
        DomainEvent {
            event_id: self.event_id,
            name: self.name,
            occurred_at: self.occurred_at,
            payload: self.payload,
        }
    }
}

/// A durable, at-least-once task queue.
///
/// Redelivery of failed deliveries belongs to the implementation; the
/// recommended policy is exponential backoff with at most 5 attempts
/// before dead-lettering. Handlers are required to be idempotent either
/// way, since a crash between enqueue and completion re-delivers.
#[async_trait]
pub trait TaskQueue: Send + Sync {
    /// Enqueues one delivery. Blocks only long enough to hand the envelope
    /// to the queue; the publisher never waits for handler execution.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StorageUnavailable` if the queue cannot accept
    /// the envelope.
    async fn enqueue(&self, envelope: EventEnvelope) -> Result<(), DomainError>;
}

/// Development stand-in for a durable broker: an in-process channel
/// drained by a worker task. Deliveries are lost on process exit and are
/// not retried.
pub struct InProcessQueue {
    sender: mpsc::UnboundedSender<EventEnvelope>,
}

impl InProcessQueue {
    /// Creates the queue and spawns the worker task that drains it into
    /// the dispatcher. The worker exits when the queue is dropped.
    #[must_use]
    pub fn start(dispatcher: DeferredDispatcher) -> (Self, tokio::task::JoinHandle<()>) {
        let (sender, mut receiver) = mpsc::unbounded_channel::<EventEnvelope>();
        let worker = tokio::spawn(async move {
            while let Some(envelope) = receiver.recv().await {
                dispatcher.dispatch(&envelope).await;
            }
        });
        (Self { sender }, worker)
    }
}

#[async_trait]
impl TaskQueue for InProcessQueue {
    async fn enqueue(&self, envelope: EventEnvelope) -> Result<(), DomainError> {
        self.sender
            .send(envelope)
            .map_err(|_| DomainError::StorageUnavailable("event queue closed".to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::TimeZone;
    use inkfair_core::clock::Clock;

    use crate::handler::{DeliveryMode, EventHandler};
    use crate::registry::HandlerRegistry;

    use super::*;

    struct TestClock(DateTime<Utc>);

    impl Clock for TestClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn sample_event() -> DomainEvent {
        let clock = TestClock(Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap());
        DomainEvent::new(
            "catalog.product_created",
            serde_json::json!({"product_id": "7", "shop_id": "3"}),
            &clock,
        )
    }

    #[test]
    fn test_envelope_wire_format_is_stable() {
        let envelope = EventEnvelope::from_event(&sample_event());

        let json = serde_json::to_value(&envelope).unwrap();
        let object = json.as_object().unwrap();

        // Renaming or dropping any of these keys breaks re-delivery of
        // envelopes enqueued before a deploy.
        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["event_id", "name", "occurred_at", "payload"]);
    }

    #[test]
    fn test_envelope_round_trips_through_json() {
        let envelope = EventEnvelope::from_event(&sample_event());

        let json = serde_json::to_string(&envelope).unwrap();
        let decoded: EventEnvelope = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, envelope);
    }

    #[test]
    fn test_envelope_preserves_event_fields() {
        let event = sample_event();

        let round_tripped = EventEnvelope::from_event(&event).into_event();

        assert_eq!(round_tripped, event);
    }

    struct Recording {
        log: Arc<Mutex<Vec<Uuid>>>,
    }

    #[async_trait]
    impl EventHandler for Recording {
        fn name(&self) -> &'static str {
            "test.recording"
        }

        async fn handle(&self, event: &DomainEvent) -> Result<(), DomainError> {
            self.log.lock().unwrap().push(event.event_id);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_in_process_queue_drains_into_deferred_handlers() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let registry = Arc::new(
            HandlerRegistry::builder()
                .subscribe(
                    "catalog.product_created",
                    Arc::new(Recording { log: log.clone() }),
                    DeliveryMode::Deferred,
                )
                .build(),
        );
        let dispatcher = DeferredDispatcher::new(registry);
        let (queue, worker) = InProcessQueue::start(dispatcher);

        let event = sample_event();
        queue
            .enqueue(EventEnvelope::from_event(&event))
            .await
            .unwrap();

        // Dropping the queue closes the channel and lets the worker exit.
        drop(queue);
        worker.await.unwrap();

        assert_eq!(*log.lock().unwrap(), vec![event.event_id]);
    }

    #[tokio::test]
    async fn test_enqueue_after_worker_shutdown_is_an_error() {
        let registry = Arc::new(HandlerRegistry::builder().build());
        let (queue, worker) = InProcessQueue::start(DeferredDispatcher::new(registry));

        // Aborting the worker drops the receiver and closes the channel.
        worker.abort();
        let _ = worker.await;

        let result = queue.enqueue(EventEnvelope::from_event(&sample_event())).await;

        match result {
            Err(DomainError::StorageUnavailable(message)) => {
                assert!(message.contains("queue closed"));
            }
            other => panic!("expected StorageUnavailable, got {other:?}"),
        }
    }
}
