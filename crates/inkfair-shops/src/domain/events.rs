//! Domain events for the Shops context.

use inkfair_core::id::DomainId;
use serde::{Deserialize, Serialize};

/// Event name emitted when a shop is created.
pub const SHOP_CREATED_EVENT: &str = "shops.shop_created";

/// Event name emitted when a shop is updated.
pub const SHOP_UPDATED_EVENT: &str = "shops.shop_updated";

/// Event name emitted when a shop is deleted.
pub const SHOP_DELETED_EVENT: &str = "shops.shop_deleted";

/// Payload for `shops.shop_created`. Carries the fields subscribers need
/// without re-querying.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopCreated {
    /// The new shop's identifier.
    pub shop_id: DomainId,
    /// Display name of the storefront.
    pub name: String,
    /// URL-safe unique handle.
    pub slug: String,
}

/// Payload for `shops.shop_updated`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopUpdated {
    /// The updated shop's identifier.
    pub shop_id: DomainId,
}

/// Payload for `shops.shop_deleted`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopDeleted {
    /// The removed shop's identifier.
    pub shop_id: DomainId,
}
