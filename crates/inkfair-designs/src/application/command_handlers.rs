//! Command handlers for the Designs context.

use inkfair_core::clock::Clock;
use inkfair_core::error::DomainError;
use inkfair_core::event::DomainEvent;
use inkfair_core::id::DomainId;
use inkfair_events::EventBus;

use crate::domain::aggregates::{Design, DesignPatch, NewDesign};
use crate::domain::events::{
    DESIGN_CREATED_EVENT, DESIGN_DELETED_EVENT, DESIGN_UPDATED_EVENT, DesignCreated,
    DesignDeleted, DesignUpdated,
};
use crate::domain::repository::DesignRepository;

/// Creates a design and publishes `designs.design_created`.
///
/// # Errors
///
/// Returns `Validation` for an empty title, any repository error, or a
/// publish error. If the create fails, no event is published.
pub async fn handle_create_design(
    fields: NewDesign,
    repo: &dyn DesignRepository,
    bus: &EventBus,
    clock: &dyn Clock,
) -> Result<Design, DomainError> {
    if fields.title.trim().is_empty() {
        return Err(DomainError::Validation("design title must not be empty".to_owned()));
    }

    let design = repo.create(fields).await?;

    let payload = DesignCreated {
        design_id: design.id.clone(),
        title: design.title.clone(),
    };
    let event = DomainEvent::new(
        DESIGN_CREATED_EVENT,
        serde_json::to_value(&payload).expect("DesignCreated serialization is infallible"),
        clock,
    );
    bus.publish(&event).await?;

    Ok(design)
}

/// Applies a patch and publishes `designs.design_updated` when a row
/// matched.
///
/// # Errors
///
/// Returns any repository or publish error.
pub async fn handle_update_design(
    id: &DomainId,
    patch: DesignPatch,
    repo: &dyn DesignRepository,
    bus: &EventBus,
    clock: &dyn Clock,
) -> Result<Option<Design>, DomainError> {
    let Some(design) = repo.update(id, patch).await? else {
        return Ok(None);
    };

    let payload = DesignUpdated {
        design_id: design.id.clone(),
    };
    let event = DomainEvent::new(
        DESIGN_UPDATED_EVENT,
        serde_json::to_value(&payload).expect("DesignUpdated serialization is infallible"),
        clock,
    );
    bus.publish(&event).await?;

    Ok(Some(design))
}

/// Deletes a design and publishes `designs.design_deleted` when a row was
/// removed.
///
/// # Errors
///
/// Returns any repository or publish error.
pub async fn handle_delete_design(
    id: &DomainId,
    repo: &dyn DesignRepository,
    bus: &EventBus,
    clock: &dyn Clock,
) -> Result<bool, DomainError> {
    if !repo.delete(id).await? {
        return Ok(false);
    }

    let payload = DesignDeleted { design_id: id.clone() };
    let event = DomainEvent::new(
        DESIGN_DELETED_EVENT,
        serde_json::to_value(&payload).expect("DesignDeleted serialization is infallible"),
        clock,
    );
    bus.publish(&event).await?;

    Ok(true)
}
