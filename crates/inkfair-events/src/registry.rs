//! Handler registry — event name to ordered subscriber list.

use std::collections::HashMap;
use std::sync::Arc;

use crate::handler::{DeliveryMode, EventHandler};

/// One registered subscriber.
#[derive(Clone)]
struct Subscription {
    handler: Arc<dyn EventHandler>,
    mode: DeliveryMode,
}

/// Immutable mapping from event name to the ordered handlers bound to it.
///
/// Built once during process initialization through the builder; after
/// `build` the registry is read-only, so concurrent `publish` calls read
/// it without locking.
pub struct HandlerRegistry {
    routes: HashMap<String, Vec<Subscription>>,
}

impl HandlerRegistry {
    /// Starts an empty registration.
    #[must_use]
    pub fn builder() -> HandlerRegistryBuilder {
        HandlerRegistryBuilder::default()
    }

    /// Handlers bound to `name` with the given delivery mode, in
    /// registration order.
    pub fn handlers(
        &self,
        name: &str,
        mode: DeliveryMode,
    ) -> impl Iterator<Item = &Arc<dyn EventHandler>> {
        self.routes
            .get(name)
            .into_iter()
            .flatten()
            .filter(move |subscription| subscription.mode == mode)
            .map(|subscription| &subscription.handler)
    }

    /// Whether `name` has at least one deferred subscriber.
    #[must_use]
    pub fn has_deferred(&self, name: &str) -> bool {
        self.handlers(name, DeliveryMode::Deferred).next().is_some()
    }
}

/// Append-only, order-preserving setup-time builder for `HandlerRegistry`.
#[derive(Default)]
pub struct HandlerRegistryBuilder {
    routes: HashMap<String, Vec<Subscription>>,
}

impl HandlerRegistryBuilder {
    /// Binds `handler` to `name` with the chosen delivery mode. Within one
    /// delivery mode, handlers registered earlier are invoked earlier.
    #[must_use]
    pub fn subscribe(
        mut self,
        name: impl Into<String>,
        handler: Arc<dyn EventHandler>,
        mode: DeliveryMode,
    ) -> Self {
        self.routes
            .entry(name.into())
            .or_default()
            .push(Subscription { handler, mode });
        self
    }

    /// Freezes the registration.
    #[must_use]
    pub fn build(self) -> HandlerRegistry {
        HandlerRegistry {
            routes: self.routes,
        }
    }
}
