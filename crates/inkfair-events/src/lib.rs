//! Inkfair Events — cross-context domain event dispatch.
//!
//! Components publish `DomainEvent` records on the `EventBus`; handlers in
//! other bounded contexts subscribe by event name, either synchronously
//! (inline with the publisher) or deferred (through the durable task
//! queue). Registration is a one-time, order-preserving setup step; after
//! the registry is built it is read-only for the process lifetime.

pub mod bus;
pub mod dispatch;
pub mod handler;
pub mod queue;
pub mod registry;

pub use bus::EventBus;
pub use dispatch::{DeferredDispatcher, DispatchReport};
pub use handler::{DeliveryMode, EventHandler, EventLog};
pub use queue::{EventEnvelope, InProcessQueue, TaskQueue};
pub use registry::{HandlerRegistry, HandlerRegistryBuilder};
