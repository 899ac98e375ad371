//! Shared test doubles for the Inkfair marketplace.

mod clock;
mod designs;
mod handlers;
mod products;
mod queue;
mod shops;

pub use clock::FixedClock;
pub use designs::{FailingDesignRepository, InMemoryDesignRepository};
pub use handlers::{CountingHandler, FailingHandler};
pub use products::{FailingProductRepository, InMemoryProductRepository};
pub use queue::RecordingQueue;
pub use shops::{FailingShopRepository, InMemoryShopRepository};
