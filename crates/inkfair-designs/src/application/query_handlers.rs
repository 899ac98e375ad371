//! Query handlers for the Designs context.

use inkfair_core::error::DomainError;
use inkfair_core::id::DomainId;
use inkfair_core::page::{Page, PageRequest};

use crate::domain::aggregates::Design;
use crate::domain::repository::DesignRepository;

/// Retrieves one design by id.
///
/// # Errors
///
/// Propagates repository errors.
pub async fn get_design(
    id: &DomainId,
    repo: &dyn DesignRepository,
) -> Result<Option<Design>, DomainError> {
    repo.find_by_id(id).await
}

/// Retrieves one page of designs.
///
/// # Errors
///
/// Propagates repository errors.
pub async fn list_designs(
    request: &PageRequest,
    repo: &dyn DesignRepository,
) -> Result<Page<Design>, DomainError> {
    repo.find_page(request).await
}
