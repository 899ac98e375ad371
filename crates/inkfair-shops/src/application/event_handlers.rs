//! Cross-context event subscribers owned by the Shops context.

use std::sync::Arc;

use async_trait::async_trait;
use inkfair_core::error::DomainError;
use inkfair_core::event::DomainEvent;
use inkfair_core::id::DomainId;
use inkfair_events::EventHandler;
use serde::Deserialize;

use crate::domain::aggregates::ShopPatch;
use crate::domain::repository::ShopRepository;

/// Wire name of the catalog event this context reacts to. Declared
/// locally: contexts share event names and payload shapes, never
/// compile-time types.
pub const PRODUCT_CREATED_EVENT: &str = "catalog.product_created";

/// This context's own view of the catalog payload. Unknown fields are
/// ignored.
#[derive(Debug, Deserialize)]
struct ProductCreatedView {
    product_id: DomainId,
    shop_id: DomainId,
}

/// Deferred subscriber that points a shop's showcase at its newest
/// product.
///
/// Idempotent: re-applying the same event sets the same showcase value,
/// so at-least-once delivery cannot duplicate the effect.
pub struct ShowcaseNewestProduct {
    shops: Arc<dyn ShopRepository>,
}

impl ShowcaseNewestProduct {
    /// Creates the subscriber over the shops repository.
    #[must_use]
    pub fn new(shops: Arc<dyn ShopRepository>) -> Self {
        Self { shops }
    }
}

#[async_trait]
impl EventHandler for ShowcaseNewestProduct {
    fn name(&self) -> &'static str {
        "shops.showcase_newest_product"
    }

    async fn handle(&self, event: &DomainEvent) -> Result<(), DomainError> {
        let view: ProductCreatedView =
            serde_json::from_value(event.payload.clone()).map_err(|e| {
                DomainError::Validation(format!("malformed {} payload: {e}", event.name))
            })?;

        let patch = ShopPatch {
            showcase_product_id: Some(view.product_id),
            ..ShopPatch::default()
        };

        if self.shops.update(&view.shop_id, patch).await?.is_none() {
            // The shop may have been deleted between commit and delivery.
            tracing::debug!(shop_id = %view.shop_id, "showcase target shop no longer exists");
        }

        Ok(())
    }
}
