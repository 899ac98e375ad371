//! Event handler doubles.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use inkfair_core::error::DomainError;
use inkfair_core::event::DomainEvent;
use inkfair_events::EventHandler;

/// A handler that counts invocations and always succeeds.
#[derive(Debug)]
pub struct CountingHandler {
    name: &'static str,
    invocations: AtomicUsize,
}

impl CountingHandler {
    /// Creates a counting handler with the given identity.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            invocations: AtomicUsize::new(0),
        }
    }

    /// Number of times the handler has been invoked.
    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventHandler for CountingHandler {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn handle(&self, _event: &DomainEvent) -> Result<(), DomainError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// A handler that always fails with a validation error.
#[derive(Debug)]
pub struct FailingHandler {
    name: &'static str,
}

impl FailingHandler {
    /// Creates a failing handler with the given identity.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

#[async_trait]
impl EventHandler for FailingHandler {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn handle(&self, event: &DomainEvent) -> Result<(), DomainError> {
        Err(DomainError::Validation(format!(
            "handler refused event {}",
            event.name
        )))
    }
}
