//! Shared application state.

use std::sync::Arc;

use inkfair_catalog::domain::repository::ProductRepository;
use inkfair_core::clock::Clock;
use inkfair_designs::domain::repository::DesignRepository;
use inkfair_events::EventBus;
use inkfair_shops::domain::repository::ShopRepository;

/// Application state shared across all request handlers.
///
/// Repositories are held behind their traits so tests can run the full
/// router against in-memory implementations.
#[derive(Clone)]
pub struct AppState {
    /// Shops repository.
    pub shops: Arc<dyn ShopRepository>,
    /// Designs repository.
    pub designs: Arc<dyn DesignRepository>,
    /// Products repository.
    pub products: Arc<dyn ProductRepository>,
    /// Domain event bus.
    pub bus: Arc<EventBus>,
    /// Clock used to stamp domain events.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        shops: Arc<dyn ShopRepository>,
        designs: Arc<dyn DesignRepository>,
        products: Arc<dyn ProductRepository>,
        bus: Arc<EventBus>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            shops,
            designs,
            products,
            bus,
            clock,
        }
    }
}
