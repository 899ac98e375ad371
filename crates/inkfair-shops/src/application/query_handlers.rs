//! Query handlers for the Shops context.

use inkfair_core::error::DomainError;
use inkfair_core::id::DomainId;
use inkfair_core::page::{Page, PageRequest};

use crate::domain::aggregates::Shop;
use crate::domain::repository::ShopRepository;

/// Retrieves one shop by id.
///
/// # Errors
///
/// Propagates repository errors.
pub async fn get_shop(
    id: &DomainId,
    repo: &dyn ShopRepository,
) -> Result<Option<Shop>, DomainError> {
    repo.find_by_id(id).await
}

/// Retrieves one page of shops.
///
/// # Errors
///
/// Propagates repository errors.
pub async fn list_shops(
    request: &PageRequest,
    repo: &dyn ShopRepository,
) -> Result<Page<Shop>, DomainError> {
    repo.find_page(request).await
}
