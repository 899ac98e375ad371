//! Aggregate root for the Catalog context.

use chrono::{DateTime, Utc};
use inkfair_core::id::DomainId;
use serde::Serialize;

/// The aggregate root for a sellable product.
///
/// Immutable after construction; an update produces a replacement value
/// from the repository. The owning shop and the printed design are
/// referenced by `DomainId` only — never as embedded aggregates — which
/// keeps every repository query single-table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    /// Aggregate identifier.
    pub id: DomainId,
    /// Owning shop reference.
    pub shop_id: DomainId,
    /// Printed design reference, when the product carries one.
    pub design_id: Option<DomainId>,
    /// Listing title.
    pub title: String,
    /// Listing description.
    pub description: Option<String>,
    /// Price in minor units.
    pub price_cents: i64,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Owning shop reference.
    pub shop_id: DomainId,
    /// Printed design reference, if any.
    pub design_id: Option<DomainId>,
    /// Listing title.
    pub title: String,
    /// Listing description.
    pub description: Option<String>,
    /// Price in minor units.
    pub price_cents: i64,
    /// ISO 4217 currency code.
    pub currency: String,
}

/// Partial update for a product; a `None` field is left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    /// New listing title.
    pub title: Option<String>,
    /// New listing description.
    pub description: Option<String>,
    /// New price in minor units.
    pub price_cents: Option<i64>,
}
