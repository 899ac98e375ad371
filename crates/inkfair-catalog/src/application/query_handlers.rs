//! Query handlers for the Catalog context.

use inkfair_core::error::DomainError;
use inkfair_core::id::DomainId;
use inkfair_core::page::{Page, PageRequest};

use crate::domain::aggregates::Product;
use crate::domain::repository::ProductRepository;

/// Retrieves one product by id.
///
/// # Errors
///
/// Propagates repository errors.
pub async fn get_product(
    id: &DomainId,
    repo: &dyn ProductRepository,
) -> Result<Option<Product>, DomainError> {
    repo.find_by_id(id).await
}

/// Retrieves one page of products. The aggregates carry raw `DomainId`
/// references; resolving them for display is the view layer's batch
/// hydration step.
///
/// # Errors
///
/// Propagates repository errors.
pub async fn list_products(
    request: &PageRequest,
    repo: &dyn ProductRepository,
) -> Result<Page<Product>, DomainError> {
    repo.find_page(request).await
}
