//! Event handler abstractions.

use async_trait::async_trait;
use inkfair_core::error::DomainError;
use inkfair_core::event::DomainEvent;

/// How a subscriber receives events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Run inline with the publisher; failure propagates to it.
    Sync,
    /// Enqueued for out-of-band execution on the worker; failure is
    /// isolated from the publisher and from sibling handlers.
    Deferred,
}

/// A subscriber to domain events.
///
/// Handlers deserialize the event payload into their own local types; no
/// payload type is shared across context boundaries. Deferred handlers
/// must be idempotent: the queue guarantees at-least-once delivery, so the
/// same event may be applied more than once.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Stable handler identity, used in failure reports and logs.
    fn name(&self) -> &'static str;

    /// Applies the event.
    ///
    /// # Errors
    ///
    /// Returns a `DomainError` describing why the event could not be
    /// applied. For synchronous handlers the error reaches the publisher;
    /// for deferred handlers it is recorded and the delivery is subject to
    /// the queue's retry policy.
    async fn handle(&self, event: &DomainEvent) -> Result<(), DomainError>;
}

/// Synchronous audit handler that logs every event it sees.
#[derive(Debug, Default, Clone, Copy)]
pub struct EventLog;

#[async_trait]
impl EventHandler for EventLog {
    fn name(&self) -> &'static str {
        "events.event_log"
    }

    async fn handle(&self, event: &DomainEvent) -> Result<(), DomainError> {
        tracing::info!(
            event_id = %event.event_id,
            name = %event.name,
            "domain event published"
        );
        Ok(())
    }
}
