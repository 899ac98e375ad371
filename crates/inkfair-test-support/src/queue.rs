//! Queue doubles.

use std::sync::Mutex;

use async_trait::async_trait;
use inkfair_core::error::DomainError;
use inkfair_events::{EventEnvelope, TaskQueue};

/// A task queue that records every enqueued envelope and never delivers.
///
/// Tests assert on the captured envelopes directly, or replay them
/// through a `DeferredDispatcher` to exercise the worker side.
#[derive(Debug, Default)]
pub struct RecordingQueue {
    envelopes: Mutex<Vec<EventEnvelope>>,
}

impl RecordingQueue {
    /// Returns a snapshot of all enqueued envelopes.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn envelopes(&self) -> Vec<EventEnvelope> {
        self.envelopes.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaskQueue for RecordingQueue {
    async fn enqueue(&self, envelope: EventEnvelope) -> Result<(), DomainError> {
        self.envelopes.lock().unwrap().push(envelope);
        Ok(())
    }
}
