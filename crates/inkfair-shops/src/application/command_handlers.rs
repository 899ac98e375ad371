//! Command handlers for the Shops context.
//!
//! Application-level orchestrators: validate field values, invoke the
//! repository, then publish the resulting domain event. An event is only
//! published for an effect the repository reported as committed.

use inkfair_core::clock::Clock;
use inkfair_core::error::DomainError;
use inkfair_core::event::DomainEvent;
use inkfair_core::id::DomainId;
use inkfair_events::EventBus;

use crate::domain::aggregates::{NewShop, Shop, ShopPatch};
use crate::domain::events::{
    SHOP_CREATED_EVENT, SHOP_DELETED_EVENT, SHOP_UPDATED_EVENT, ShopCreated, ShopDeleted,
    ShopUpdated,
};
use crate::domain::repository::ShopRepository;

fn validate_new_shop(fields: &NewShop) -> Result<(), DomainError> {
    if fields.name.trim().is_empty() {
        return Err(DomainError::Validation("shop name must not be empty".to_owned()));
    }
    validate_slug(&fields.slug)
}

fn validate_slug(slug: &str) -> Result<(), DomainError> {
    let well_formed = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if well_formed {
        Ok(())
    } else {
        Err(DomainError::Validation(
            "shop slug must be lowercase letters, digits, and hyphens".to_owned(),
        ))
    }
}

/// Creates a shop and publishes `shops.shop_created`.
///
/// # Errors
///
/// Returns `Validation` for rejected field values, any repository error,
/// or a publish error. If the create fails, no event is published.
pub async fn handle_create_shop(
    fields: NewShop,
    repo: &dyn ShopRepository,
    bus: &EventBus,
    clock: &dyn Clock,
) -> Result<Shop, DomainError> {
    validate_new_shop(&fields)?;

    let shop = repo.create(fields).await?;

    let payload = ShopCreated {
        shop_id: shop.id.clone(),
        name: shop.name.clone(),
        slug: shop.slug.clone(),
    };
    let event = DomainEvent::new(
        SHOP_CREATED_EVENT,
        serde_json::to_value(&payload).expect("ShopCreated serialization is infallible"),
        clock,
    );
    bus.publish(&event).await?;

    Ok(shop)
}

/// Applies a patch to a shop and publishes `shops.shop_updated` when a row
/// matched.
///
/// # Errors
///
/// Returns any repository or publish error.
pub async fn handle_update_shop(
    id: &DomainId,
    patch: ShopPatch,
    repo: &dyn ShopRepository,
    bus: &EventBus,
    clock: &dyn Clock,
) -> Result<Option<Shop>, DomainError> {
    if let Some(name) = &patch.name {
        if name.trim().is_empty() {
            return Err(DomainError::Validation("shop name must not be empty".to_owned()));
        }
    }

    let Some(shop) = repo.update(id, patch).await? else {
        return Ok(None);
    };

    let payload = ShopUpdated {
        shop_id: shop.id.clone(),
    };
    let event = DomainEvent::new(
        SHOP_UPDATED_EVENT,
        serde_json::to_value(&payload).expect("ShopUpdated serialization is infallible"),
        clock,
    );
    bus.publish(&event).await?;

    Ok(Some(shop))
}

/// Deletes a shop and publishes `shops.shop_deleted` when a row was
/// removed.
///
/// # Errors
///
/// Returns any repository or publish error.
pub async fn handle_delete_shop(
    id: &DomainId,
    repo: &dyn ShopRepository,
    bus: &EventBus,
    clock: &dyn Clock,
) -> Result<bool, DomainError> {
    if !repo.delete(id).await? {
        return Ok(false);
    }

    let payload = ShopDeleted { shop_id: id.clone() };
    let event = DomainEvent::new(
        SHOP_DELETED_EVENT,
        serde_json::to_value(&payload).expect("ShopDeleted serialization is infallible"),
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
    use inkfair_test_support::{CountingHandler, FixedClock, InMemoryShopRepository, RecordingQueue};

    use super::*;

    fn new_shop(slug: &str) -> NewShop {
        NewShop {
            name: "Curio Prints".to_owned(),
            slug: slug.to_owned(),
            contact_email: "hello@curio.example".to_owned(),
        }
    }

    fn fixed_clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }

    /// Bus with one deferred counting subscriber on `event_name`, plus the
    /// queue that captures its envelopes.
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
    async fn test_create_shop_persists_and_publishes() {
        // Arrange
        let repo = InMemoryShopRepository::new();
        let (bus, queue, counter) = bus_counting(SHOP_CREATED_EVENT);
        let clock = fixed_clock();

        // Act
        let shop = handle_create_shop(new_shop("curio-prints"), &repo, &bus, &clock)
            .await
            .unwrap();

        // Assert
        assert_eq!(shop.name, "Curio Prints");
        assert_eq!(shop.slug, "curio-prints");
        assert!(shop.showcase_product_id.is_none());

        // The sync subscriber ran inline.
        assert_eq!(counter.invocations(), 1);

        // One envelope was enqueued for the deferred subscriber.
        let envelopes = queue.envelopes();
        assert_eq!(envelopes.len(), 1);
        assert_eq!(envelopes[0].name, SHOP_CREATED_EVENT);
        assert_eq!(envelopes[0].payload["shop_id"], shop.id.as_str());
        assert_eq!(envelopes[0].payload["slug"], "curio-prints");
        assert_eq!(
            envelopes[0].occurred_at,
            Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn test_create_shop_rejects_empty_name() {
        let repo = InMemoryShopRepository::new();
        let (bus, queue, counter) = bus_counting(SHOP_CREATED_EVENT);

        let mut fields = new_shop("curio-prints");
        fields.name = "  ".to_owned();
        let result = handle_create_shop(fields, &repo, &bus, &fixed_clock()).await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(counter.invocations(), 0);
        assert!(queue.envelopes().is_empty());
    }

    #[tokio::test]
    async fn test_create_shop_rejects_malformed_slug() {
        let repo = InMemoryShopRepository::new();
        let (bus, _queue, _counter) = bus_counting(SHOP_CREATED_EVENT);

        for slug in ["", "Has Caps", "space slug", "ümlaut"] {
            let result = handle_create_shop(new_shop(slug), &repo, &bus, &fixed_clock()).await;
            assert!(matches!(result, Err(DomainError::Validation(_))), "slug {slug:?}");
        }
    }

    #[tokio::test]
    async fn test_duplicate_slug_surfaces_constraint_violation() {
        let repo = InMemoryShopRepository::new();
        let (bus, queue, _counter) = bus_counting(SHOP_CREATED_EVENT);
        let clock = fixed_clock();

        handle_create_shop(new_shop("curio-prints"), &repo, &bus, &clock)
            .await
            .unwrap();
        let result = handle_create_shop(new_shop("curio-prints"), &repo, &bus, &clock).await;

        match result {
            Err(DomainError::ConstraintViolation { field, .. }) => {
                assert_eq!(field.as_deref(), Some("slug"));
            }
            other => panic!("expected ConstraintViolation, got {other:?}"),
        }
        // Only the first create published.
        assert_eq!(queue.envelopes().len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_shop_returns_none_without_publishing() {
        let repo = InMemoryShopRepository::new();
        let (bus, queue, counter) = bus_counting(SHOP_UPDATED_EVENT);

        let result = handle_update_shop(
            &DomainId::from("404"),
            ShopPatch {
                name: Some("Renamed".to_owned()),
                ..ShopPatch::default()
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
        let repo = InMemoryShopRepository::new();
        let (bus, queue, _counter) = bus_counting(SHOP_UPDATED_EVENT);
        let clock = fixed_clock();

        let created = repo.create(new_shop("curio-prints")).await.unwrap();

        let updated = handle_update_shop(
            &created.id,
            ShopPatch {
                name: Some("Curio Prints & Co".to_owned()),
                ..ShopPatch::default()
            },
            &repo,
            &bus,
            &clock,
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(updated.name, "Curio Prints & Co");
        assert_eq!(updated.slug, "curio-prints");
        assert_eq!(queue.envelopes().len(), 1);
        assert_eq!(queue.envelopes()[0].payload["shop_id"], created.id.as_str());
    }

    #[tokio::test]
    async fn test_delete_publishes_only_when_a_row_was_removed() {
        let repo = InMemoryShopRepository::new();
        let (bus, queue, _counter) = bus_counting(SHOP_DELETED_EVENT);
        let clock = fixed_clock();

        let created = repo.create(new_shop("curio-prints")).await.unwrap();

        assert!(handle_delete_shop(&created.id, &repo, &bus, &clock).await.unwrap());
        assert!(!handle_delete_shop(&created.id, &repo, &bus, &clock).await.unwrap());

        assert_eq!(queue.envelopes().len(), 1);
    }
}
