//! Process-wide domain event bus.

use std::sync::Arc;

use inkfair_core::error::DomainError;
use inkfair_core::event::DomainEvent;

use crate::handler::DeliveryMode;
use crate::queue::{EventEnvelope, TaskQueue};
use crate::registry::HandlerRegistry;

/// Publish side of the event bus.
///
/// The registry is frozen before the first publish, so publishing reads it
/// without locking. Each event is handed to the task queue as a single
/// envelope when it has deferred subscribers; synchronous subscribers then
/// run inline, in registration order.
pub struct EventBus {
    registry: Arc<HandlerRegistry>,
    queue: Arc<dyn TaskQueue>,
}

impl EventBus {
    /// Creates a bus over the process registry and queue.
    #[must_use]
    pub fn new(registry: Arc<HandlerRegistry>, queue: Arc<dyn TaskQueue>) -> Self {
        Self { registry, queue }
    }

    /// Publishes one event.
    ///
    /// The envelope is enqueued before the synchronous handlers run: the
    /// event describes a state change that already committed, so a
    /// synchronous handler failure must not suppress deferred delivery.
    /// The first synchronous handler failure aborts the remaining
    /// synchronous handlers and propagates to the publisher.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StorageUnavailable` if the queue rejects the
    /// envelope, or `DomainError::HandlerFailure` naming the first
    /// synchronous handler that failed.
    pub async fn publish(&self, event: &DomainEvent) -> Result<(), DomainError> {
        if self.registry.has_deferred(&event.name) {
            self.queue.enqueue(EventEnvelope::from_event(event)).await?;
        }

        for handler in self.registry.handlers(&event.name, DeliveryMode::Sync) {
            handler
                .handle(event)
                .await
                .map_err(|err| DomainError::HandlerFailure {
                    handler: handler.name().to_owned(),
                    event: event.name.clone(),
                    message: err.to_string(),
                })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use inkfair_core::clock::Clock;

    use crate::handler::EventHandler;

    use super::*;

    struct TestClock(DateTime<Utc>);

    impl Clock for TestClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn event_named(name: &str) -> DomainEvent {
        let clock = TestClock(Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap());
        DomainEvent::new(name, serde_json::json!({}), &clock)
    }

    struct Recording {
        name: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl EventHandler for Recording {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn handle(&self, _event: &DomainEvent) -> Result<(), DomainError> {
            self.log.lock().unwrap().push(self.name);
            Ok(())
        }
    }

    struct Failing;

    #[async_trait]
    impl EventHandler for Failing {
        fn name(&self) -> &'static str {
            "test.failing"
        }

        async fn handle(&self, _event: &DomainEvent) -> Result<(), DomainError> {
            Err(DomainError::Validation("boom".to_owned()))
        }
    }

    #[derive(Default)]
    struct RecordingQueue {
        envelopes: Mutex<Vec<EventEnvelope>>,
    }

    #[async_trait]
    impl TaskQueue for RecordingQueue {
        async fn enqueue(&self, envelope: EventEnvelope) -> Result<(), DomainError> {
            self.envelopes.lock().unwrap().push(envelope);
            Ok(())
        }
    }

    fn bus_with(registry: HandlerRegistry) -> (EventBus, Arc<RecordingQueue>) {
        let queue = Arc::new(RecordingQueue::default());
        (EventBus::new(Arc::new(registry), queue.clone()), queue)
    }

    #[tokio::test]
    async fn test_sync_handlers_run_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let registry = HandlerRegistry::builder()
            .subscribe(
                "x",
                Arc::new(Recording {
                    name: "a",
                    log: log.clone(),
                }),
                DeliveryMode::Sync,
            )
            .subscribe(
                "x",
                Arc::new(Recording {
                    name: "b",
                    log: log.clone(),
                }),
                DeliveryMode::Sync,
            )
            .build();
        let (bus, _queue) = bus_with(registry);

        // Repeated publishes stay deterministic.
        for _ in 0..3 {
            bus.publish(&event_named("x")).await.unwrap();
        }

        assert_eq!(*log.lock().unwrap(), vec!["a", "b", "a", "b", "a", "b"]);
    }

    #[tokio::test]
    async fn test_sync_handler_failure_propagates_as_handler_failure() {
        let registry = HandlerRegistry::builder()
            .subscribe("x", Arc::new(Failing), DeliveryMode::Sync)
            .build();
        let (bus, _queue) = bus_with(registry);

        let result = bus.publish(&event_named("x")).await;

        match result {
            Err(DomainError::HandlerFailure {
                handler,
                event,
                message,
            }) => {
                assert_eq!(handler, "test.failing");
                assert_eq!(event, "x");
                assert!(message.contains("boom"));
            }
            other => panic!("expected HandlerFailure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_one_envelope_enqueued_regardless_of_deferred_handler_count() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let registry = HandlerRegistry::builder()
            .subscribe(
                "x",
                Arc::new(Recording {
                    name: "d1",
                    log: log.clone(),
                }),
                DeliveryMode::Deferred,
            )
            .subscribe(
                "x",
                Arc::new(Recording {
                    name: "d2",
                    log: log.clone(),
                }),
                DeliveryMode::Deferred,
            )
            .build();
        let (bus, queue) = bus_with(registry);

        let event = event_named("x");
        bus.publish(&event).await.unwrap();

        let envelopes = queue.envelopes.lock().unwrap();
        assert_eq!(envelopes.len(), 1);
        assert_eq!(envelopes[0].event_id, event.event_id);
        assert_eq!(envelopes[0].name, "x");
        // Deferred handlers do not run inline with the publisher.
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_no_deferred_subscribers_means_no_enqueue() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let registry = HandlerRegistry::builder()
            .subscribe(
                "x",
                Arc::new(Recording {
                    name: "a",
                    log: log.clone(),
                }),
                DeliveryMode::Sync,
            )
            .build();
        let (bus, queue) = bus_with(registry);

        bus.publish(&event_named("x")).await.unwrap();

        assert!(queue.envelopes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_publish_with_no_subscribers_is_ok() {
        let (bus, queue) = bus_with(HandlerRegistry::builder().build());

        bus.publish(&event_named("nobody.cares")).await.unwrap();

        assert!(queue.envelopes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sync_failure_does_not_suppress_deferred_enqueue() {
        let registry = HandlerRegistry::builder()
            .subscribe("x", Arc::new(Failing), DeliveryMode::Sync)
            .subscribe(
                "x",
                Arc::new(Recording {
                    name: "d",
                    log: Arc::new(Mutex::new(Vec::new())),
                }),
                DeliveryMode::Deferred,
            )
            .build();
        let (bus, queue) = bus_with(registry);

        let result = bus.publish(&event_named("x")).await;

        assert!(result.is_err());
        assert_eq!(queue.envelopes.lock().unwrap().len(), 1);
    }
}
