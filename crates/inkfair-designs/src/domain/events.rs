//! Domain events for the Designs context.

use inkfair_core::id::DomainId;
use serde::{Deserialize, Serialize};

/// Event name emitted when a design is created.
pub const DESIGN_CREATED_EVENT: &str = "designs.design_created";

/// Event name emitted when a design is updated.
pub const DESIGN_UPDATED_EVENT: &str = "designs.design_updated";

/// Event name emitted when a design is deleted.
pub const DESIGN_DELETED_EVENT: &str = "designs.design_deleted";

/// Payload for `designs.design_created`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignCreated {
    /// The new design's identifier.
    pub design_id: DomainId,
    /// Artwork title.
    pub title: String,
}

/// Payload for `designs.design_updated`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignUpdated {
    /// The updated design's identifier.
    pub design_id: DomainId,
}

/// Payload for `designs.design_deleted`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignDeleted {
    /// The removed design's identifier.
    pub design_id: DomainId,
}
