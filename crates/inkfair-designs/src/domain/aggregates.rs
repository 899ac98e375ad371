//! Aggregate root for the Designs context.

use chrono::{DateTime, Utc};
use inkfair_core::id::DomainId;
use serde::Serialize;

/// The aggregate root for a piece of uploaded artwork.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Design {
    /// Aggregate identifier.
    pub id: DomainId,
    /// Artwork title.
    pub title: String,
    /// Rendered preview location, when one has been generated.
    pub preview_url: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Fields for creating a design.
#[derive(Debug, Clone)]
pub struct NewDesign {
    /// Artwork title.
    pub title: String,
    /// Rendered preview location, when already known.
    pub preview_url: Option<String>,
}

/// Partial update for a design; a `None` field is left unchanged.
#[derive(Debug, Clone, Default)]
pub struct DesignPatch {
    /// New artwork title.
    pub title: Option<String>,
    /// New preview location.
    pub preview_url: Option<String>,
}
