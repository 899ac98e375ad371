//! Domain events for the Catalog context.

use inkfair_core::id::DomainId;
use serde::{Deserialize, Serialize};

/// Event name emitted when a product is created.
pub const PRODUCT_CREATED_EVENT: &str = "catalog.product_created";

/// Event name emitted when a product is updated.
pub const PRODUCT_UPDATED_EVENT: &str = "catalog.product_updated";

/// Event name emitted when a product is deleted.
pub const PRODUCT_DELETED_EVENT: &str = "catalog.product_deleted";

/// Payload for `catalog.product_created`.
///
/// Carries the denormalized fields subscribers need without forcing them
/// to re-query the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreated {
    /// The new product's identifier.
    pub product_id: DomainId,
    /// Owning shop reference.
    pub shop_id: DomainId,
    /// Printed design reference, if any.
    pub design_id: Option<DomainId>,
    /// Listing title.
    pub title: String,
    /// Price in minor units.
    pub price_cents: i64,
}

/// Payload for `catalog.product_updated`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdated {
    /// The updated product's identifier.
    pub product_id: DomainId,
}

/// Payload for `catalog.product_deleted`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDeleted {
    /// The removed product's identifier.
    pub product_id: DomainId,
    /// The shop that owned it.
    pub shop_id: DomainId,
}
