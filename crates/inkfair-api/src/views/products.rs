//! Hydrated product views.
//!
//! Products carry their shop and design relations as raw `DomainId`
//! references. This module is the presentation face of batch hydration:
//! collect the distinct foreign ids across the page, resolve each
//! referenced type with a single `find_by_ids` call, then map every
//! product through the per-response resolution maps. The maps are local
//! values and are dropped with the page view — nothing is cached across
//! requests.

use chrono::{DateTime, Utc};
use inkfair_catalog::domain::aggregates::Product;
use inkfair_core::error::DomainError;
use inkfair_core::hydration::{RefMap, collect_refs};
use inkfair_core::id::DomainId;
use inkfair_core::page::Page;
use inkfair_designs::domain::aggregates::Design;
use inkfair_designs::domain::repository::DesignRepository;
use inkfair_shops::domain::aggregates::Shop;
use inkfair_shops::domain::repository::ShopRepository;
use serde::Serialize;

/// Displayable excerpt of a shop.
#[derive(Debug, Serialize)]
pub struct ShopSummary {
    /// Shop identifier.
    pub id: DomainId,
    /// Display name.
    pub name: String,
    /// URL-safe handle.
    pub slug: String,
}

impl ShopSummary {
    fn from_shop(shop: &Shop) -> Self {
        Self {
            id: shop.id.clone(),
            name: shop.name.clone(),
            slug: shop.slug.clone(),
        }
    }
}

/// Displayable excerpt of a design.
#[derive(Debug, Serialize)]
pub struct DesignSummary {
    /// Design identifier.
    pub id: DomainId,
    /// Artwork title.
    pub title: String,
    /// Rendered preview location.
    pub preview_url: Option<String>,
}

impl DesignSummary {
    fn from_design(design: &Design) -> Self {
        Self {
            id: design.id.clone(),
            title: design.title.clone(),
            preview_url: design.preview_url.clone(),
        }
    }
}

/// A relation field on a view: the referenced aggregate's summary, or an
/// explicit unresolved marker carrying the dangling id. Never a
/// fabricated placeholder.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Relation<T> {
    /// The reference resolved in the batch map.
    Resolved {
        /// The referenced aggregate's summary.
        #[serde(flatten)]
        summary: T,
    },
    /// The reference did not resolve.
    Unresolved {
        /// The dangling identifier.
        id: DomainId,
    },
}

/// One product with its relations resolved for display.
#[derive(Debug, Serialize)]
pub struct ProductView {
    /// Product identifier.
    pub id: DomainId,
    /// Listing title.
    pub title: String,
    /// Listing description.
    pub description: Option<String>,
    /// Price in minor units.
    pub price_cents: i64,
    /// ISO 4217 currency code.
    pub currency: String,
    /// The owning shop.
    pub shop: Relation<ShopSummary>,
    /// The printed design, when the product carries one.
    pub design: Option<Relation<DesignSummary>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Resolves the shop and design references across one page of products.
///
/// Query bound: one `find_by_ids` call per referenced type with at least
/// one non-null reference on the page, independent of the number of
/// products. Duplicate references are deduplicated before the calls.
///
/// # Errors
///
/// Propagates repository errors from the `find_by_ids` calls.
pub async fn hydrate_product_page(
    page: Page<Product>,
    shops: &dyn ShopRepository,
    designs: &dyn DesignRepository,
) -> Result<Page<ProductView>, DomainError> {
    let shop_ids = collect_refs(&page.items, |product: &Product| Some(&product.shop_id));
    let design_ids = collect_refs(&page.items, |product: &Product| product.design_id.as_ref());

    let shop_map = if shop_ids.is_empty() {
        RefMap::default()
    } else {
        RefMap::new(shops.find_by_ids(&shop_ids).await?)
    };
    let design_map = if design_ids.is_empty() {
        RefMap::default()
    } else {
        RefMap::new(designs.find_by_ids(&design_ids).await?)
    };

    Ok(page.map(|product| {
        let shop = match shop_map.get(&product.shop_id) {
            Some(shop) => Relation::Resolved {
                summary: ShopSummary::from_shop(shop),
            },
            None => Relation::Unresolved {
                id: product.shop_id.clone(),
            },
        };
        let design = product.design_id.clone().map(|design_id| {
            match design_map.get(&design_id) {
                Some(design) => Relation::Resolved {
                    summary: DesignSummary::from_design(design),
                },
                None => Relation::Unresolved { id: design_id },
            }
        });

        ProductView {
            id: product.id,
            title: product.title,
            description: product.description,
            price_cents: product.price_cents,
            currency: product.currency,
            shop,
            design,
            created_at: product.created_at,
        }
    }))
}
