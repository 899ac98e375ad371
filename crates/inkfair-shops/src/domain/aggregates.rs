//! Aggregate root for the Shops context.

use chrono::{DateTime, Utc};
use inkfair_core::id::DomainId;
use serde::Serialize;

/// The aggregate root for a merchant storefront.
///
/// Immutable after construction; an update produces a replacement value
/// from the repository. Relations to other aggregates are carried as
/// `DomainId` references only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shop {
    /// Aggregate identifier.
    pub id: DomainId,
    /// Display name of the storefront.
    pub name: String,
    /// URL-safe unique handle.
    pub slug: String,
    /// Merchant contact address.
    pub contact_email: String,
    /// Newest product in this shop, maintained by a deferred subscriber
    /// to catalog events.
    pub showcase_product_id: Option<DomainId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Fields for creating a shop.
#[derive(Debug, Clone)]
pub struct NewShop {
    /// Display name of the storefront.
    pub name: String,
    /// URL-safe unique handle.
    pub slug: String,
    /// Merchant contact address.
    pub contact_email: String,
}

/// Partial update for a shop; a `None` field is left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ShopPatch {
    /// New display name.
    pub name: Option<String>,
    /// New contact address.
    pub contact_email: Option<String>,
    /// New showcase product reference.
    pub showcase_product_id: Option<DomainId>,
}
