//! Command handlers for the Catalog context.
//!
//! The create-product handler is the canonical use-case shape: validate
//! field values, run the repository write (one storage transaction), then
//! construct and publish the domain event describing the committed
//! change. Publish-after-commit is mandatory — no event may describe a
//! state that did not durably commit.

use inkfair_core::clock::Clock;
use inkfair_core::error::DomainError;
use inkfair_core::event::DomainEvent;
use inkfair_core::id::DomainId;
use inkfair_events::EventBus;

use crate::domain::aggregates::{NewProduct, Product, ProductPatch};
use crate::domain::events::{
    PRODUCT_CREATED_EVENT, PRODUCT_DELETED_EVENT, PRODUCT_UPDATED_EVENT, ProductCreated,
    ProductDeleted, ProductUpdated,
};
use crate::domain::repository::ProductRepository;

fn validate_new_product(fields: &NewProduct) -> Result<(), DomainError> {
    if fields.title.trim().is_empty() {
        return Err(DomainError::Validation("product title must not be empty".to_owned()));
    }
    validate_price(fields.price_cents)?;
    validate_currency(&fields.currency)
}

fn validate_price(price_cents: i64) -> Result<(), DomainError> {
    if price_cents < 0 {
        return Err(DomainError::Validation("product price must not be negative".to_owned()));
    }
    Ok(())
}

fn validate_currency(currency: &str) -> Result<(), DomainError> {
    if currency.len() == 3 && currency.chars().all(|c| c.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(DomainError::Validation(
            "currency must be a three-letter uppercase code".to_owned(),
        ))
    }
}

/// Creates a product and publishes `catalog.product_created` carrying the
/// new product's id and the denormalized fields subscribers display.
///
/// # Errors
///
/// Returns `Validation` for rejected field values, any repository error,
/// or a publish error. If the repository create fails, the event is never
/// published.
pub async fn handle_create_product(
    fields: NewProduct,
    repo: &dyn ProductRepository,
    bus: &EventBus,
    clock: &dyn Clock,
) -> Result<Product, DomainError> {
    validate_new_product(&fields)?;

    let product = repo.create(fields).await?;

    let payload = ProductCreated {
        product_id: product.id.clone(),
        shop_id: product.shop_id.clone(),
        design_id: product.design_id.clone(),
        title: product.title.clone(),
        price_cents: product.price_cents,
    };
    let event = DomainEvent::new(
        PRODUCT_CREATED_EVENT,
        serde_json::to_value(&payload).expect("ProductCreated serialization is infallible"),
        clock,
    );
    bus.publish(&event).await?;

    Ok(product)
}

/// Applies a patch to a product and publishes `catalog.product_updated`
/// when a row matched.
///
/// # Errors
///
/// Returns `Validation` for rejected patch values, any repository error,
/// or a publish error.
pub async fn handle_update_product(
    id: &DomainId,
    patch: ProductPatch,
    repo: &dyn ProductRepository,
    bus: &EventBus,
    clock: &dyn Clock,
) -> Result<Option<Product>, DomainError> {
    if let Some(title) = &patch.title {
        if title.trim().is_empty() {
            return Err(DomainError::Validation("product title must not be empty".to_owned()));
        }
    }
    if let Some(price_cents) = patch.price_cents {
        validate_price(price_cents)?;
    }

    let Some(product) = repo.update(id, patch).await? else {
        return Ok(None);
    };

    let payload = ProductUpdated {
        product_id: product.id.clone(),
    };
    let event = DomainEvent::new(
        PRODUCT_UPDATED_EVENT,
        serde_json::to_value(&payload).expect("ProductUpdated serialization is infallible"),
        clock,
    );
    bus.publish(&event).await?;

    Ok(Some(product))
}

/// Deletes a product and publishes `catalog.product_deleted` when a row
/// was removed.
///
/// # Errors
///
/// Returns any repository or publish error.
pub async fn handle_delete_product(
    id: &DomainId,
    repo: &dyn ProductRepository,
    bus: &EventBus,
    clock: &dyn Clock,
) -> Result<bool, DomainError> {
    // The shop reference is needed for the event payload, so load before
    // deleting.
    let Some(product) = repo.find_by_id(id).await? else {
        return Ok(false);
    };
    if !repo.delete(id).await? {
        return Ok(false);
    }

    let payload = ProductDeleted {
        product_id: product.id,
        shop_id: product.shop_id,
    };
    let event = DomainEvent::new(
        PRODUCT_DELETED_EVENT,
        serde_json::to_value(&payload).expect("ProductDeleted serialization is infallible"),
        clock,
    );
    bus.publish(&event).await?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use inkfair_events::{DeliveryMode, EventBus, HandlerRegistry};
    use inkfair_test_support::{
        CountingHandler, FailingProductRepository, FixedClock, InMemoryProductRepository,
        RecordingQueue,
    };

    use super::*;

    fn new_product(shop: &str) -> NewProduct {
        NewProduct {
            shop_id: DomainId::from(shop),
            design_id: Some(DomainId::from("11")),
            title: "Fern Tote Bag".to_owned(),
            description: Some("Heavyweight canvas tote".to_owned()),
            price_cents: 2400,
            currency: "USD".to_owned(),
        }
    }

    fn fixed_clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }

    /// Bus with one sync and one deferred counting subscriber on
    /// `event_name`, plus the queue capturing deferred envelopes.
    fn bus_counting(event_name: &str) -> (EventBus, Arc<RecordingQueue>, Arc<CountingHandler>) {
        let counter = Arc::new(CountingHandler::new("test.counter"));
        let queue = Arc::new(RecordingQueue::default());
        let registry = HandlerRegistry::builder()
            .subscribe(event_name, counter.clone(), DeliveryMode::Sync)
            .subscribe(event_name, counter.clone(), DeliveryMode::Deferred)
            .build();
        (EventBus::new(Arc::new(registry), queue.clone()), queue, counter)
    }

    #[tokio::test]
    async fn test_create_product_persists_then_publishes() {
        // Arrange
        let repo = InMemoryProductRepository::new();
        let (bus, queue, counter) = bus_counting(PRODUCT_CREATED_EVENT);
        let clock = fixed_clock();

        // Act
        let product = handle_create_product(new_product("3"), &repo, &bus, &clock)
            .await
            .unwrap();

        // Assert
        assert_eq!(product.shop_id, DomainId::from("3"));
        assert_eq!(product.title, "Fern Tote Bag");
        assert_eq!(product.price_cents, 2400);

        assert_eq!(counter.invocations(), 1);

        let envelopes = queue.envelopes();
        assert_eq!(envelopes.len(), 1);
        assert_eq!(envelopes[0].name, PRODUCT_CREATED_EVENT);
        // Subscribers get the denormalized fields without re-querying.
        assert_eq!(envelopes[0].payload["product_id"], product.id.as_str());
        assert_eq!(envelopes[0].payload["shop_id"], "3");
        assert_eq!(envelopes[0].payload["design_id"], "11");
        assert_eq!(envelopes[0].payload["title"], "Fern Tote Bag");
        assert_eq!(envelopes[0].payload["price_cents"], 2400);
    }

    #[tokio::test]
    async fn test_failed_create_publishes_nothing() {
        // Arrange — a repository whose writes always fail.
        let repo = FailingProductRepository;
        let (bus, queue, counter) = bus_counting(PRODUCT_CREATED_EVENT);

        // Act
        let result = handle_create_product(new_product("3"), &repo, &bus, &fixed_clock()).await;

        // Assert — the error surfaced and no event described the
        // uncommitted state.
        assert!(matches!(result, Err(DomainError::StorageUnavailable(_))));
        assert_eq!(counter.invocations(), 0);
        assert!(queue.envelopes().is_empty());
    }

    #[tokio::test]
    async fn test_create_product_rejects_bad_fields_before_touching_storage() {
        let repo = InMemoryProductRepository::new();
        let (bus, queue, _counter) = bus_counting(PRODUCT_CREATED_EVENT);
        let clock = fixed_clock();

        let mut blank_title = new_product("3");
        blank_title.title = "  ".to_owned();
        let mut negative_price = new_product("3");
        negative_price.price_cents = -1;
        let mut bad_currency = new_product("3");
        bad_currency.currency = "usd".to_owned();

        for fields in [blank_title, negative_price, bad_currency] {
            let result = handle_create_product(fields, &repo, &bus, &clock).await;
            assert!(matches!(result, Err(DomainError::Validation(_))));
        }

        assert_eq!(repo.len(), 0);
        assert!(queue.envelopes().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_product_returns_none_without_publishing() {
        let repo = InMemoryProductRepository::new();
        let (bus, queue, counter) = bus_counting(PRODUCT_UPDATED_EVENT);

        let result = handle_update_product(
            &DomainId::from("404"),
            ProductPatch {
                price_cents: Some(2600),
                ..ProductPatch::default()
            },
            &repo,
            &bus,
            &fixed_clock(),
        )
        .await
        .unwrap();

        assert!(result.is_none());
        assert_eq!(counter.invocations(), 0);
        assert!(queue.envelopes().is_empty());
    }

    #[tokio::test]
    async fn test_update_applies_patch_and_publishes() {
        let repo = InMemoryProductRepository::new();
        let (bus, queue, _counter) = bus_counting(PRODUCT_UPDATED_EVENT);
        let clock = fixed_clock();

        let created = repo.create(new_product("3")).await.unwrap();

        let updated = handle_update_product(
            &created.id,
            ProductPatch {
                price_cents: Some(2600),
                ..ProductPatch::default()
            },
            &repo,
            &bus,
            &clock,
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(updated.price_cents, 2600);
        // Untouched fields survive the patch.
        assert_eq!(updated.title, "Fern Tote Bag");
        assert_eq!(queue.envelopes().len(), 1);
        assert_eq!(queue.envelopes()[0].payload["product_id"], created.id.as_str());
    }

    #[tokio::test]
    async fn test_delete_publishes_shop_reference_for_subscribers() {
        let repo = InMemoryProductRepository::new();
        let (bus, queue, _counter) = bus_counting(PRODUCT_DELETED_EVENT);
        let clock = fixed_clock();

        let created = repo.create(new_product("3")).await.unwrap();

        assert!(handle_delete_product(&created.id, &repo, &bus, &clock).await.unwrap());
        assert!(!handle_delete_product(&created.id, &repo, &bus, &clock).await.unwrap());

        let envelopes = queue.envelopes();
        assert_eq!(envelopes.len(), 1);
        assert_eq!(envelopes[0].payload["product_id"], created.id.as_str());
        assert_eq!(envelopes[0].payload["shop_id"], "3");
    }
}
