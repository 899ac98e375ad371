//! Worker-side dispatch of deferred deliveries.

use std::sync::Arc;

use crate::handler::DeliveryMode;
use crate::queue::EventEnvelope;
use crate::registry::HandlerRegistry;

/// Outcome of dispatching one envelope.
#[derive(Debug, Default)]
pub struct DispatchReport {
    /// Handlers that ran to completion, in invocation order.
    pub succeeded: Vec<&'static str>,
    /// Handlers that failed, with their error messages. A queue adapter
    /// uses this to nack the delivery for redelivery.
    pub failed: Vec<(&'static str, String)>,
}

impl DispatchReport {
    /// Whether every handler completed.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Runs the deferred handlers bound to an envelope's event name.
///
/// Shares the frozen `HandlerRegistry` with the publish side so both sides
/// agree on registration order.
#[derive(Clone)]
pub struct DeferredDispatcher {
    registry: Arc<HandlerRegistry>,
}

impl DeferredDispatcher {
    /// Creates a dispatcher over the process registry.
    #[must_use]
    pub fn new(registry: Arc<HandlerRegistry>) -> Self {
        Self { registry }
    }

    /// Invokes every deferred handler for the envelope's event name, in
    /// registration order. A handler failure is logged and recorded in the
    /// report; it never prevents the remaining handlers from running and
    /// never reaches the publisher.
    pub async fn dispatch(&self, envelope: &EventEnvelope) -> DispatchReport {
        let event = envelope.clone().into_event();
        let mut report = DispatchReport::default();

        for handler in self.registry.handlers(&event.name, DeliveryMode::Deferred) {
            match handler.handle(&event).await {
                Ok(()) => report.succeeded.push(handler.name()),
                Err(err) => {
                    tracing::error!(
                        handler = handler.name(),
                        event_id = %event.event_id,
                        event = %event.name,
                        error = %err,
                        "deferred handler failed"
                    );
                    report.failed.push((handler.name(), err.to_string()));
                }
            }
        }

        report
    }
}
