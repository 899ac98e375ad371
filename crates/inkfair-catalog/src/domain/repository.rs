//! Repository contract for the Catalog context.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use inkfair_core::error::DomainError;
use inkfair_core::id::DomainId;
use inkfair_core::page::{Page, PageRequest};

use super::aggregates::{NewProduct, Product, ProductPatch};

/// Loads and persists `Product` aggregate roots.
///
/// No method returns or accepts a related aggregate; the shop and design
/// relations cross this boundary as `DomainId` values only. Resolving
/// them for display is the batch hydrator's job, not the repository's.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Loads one product by id. At most one query, no joined relations.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdentifier` or `StorageUnavailable`.
    async fn find_by_id(&self, id: &DomainId) -> Result<Option<Product>, DomainError>;

    /// Loads many products in exactly one query, regardless of input
    /// size; missing ids are absent from the result mapping.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdentifier` or `StorageUnavailable`.
    async fn find_by_ids(
        &self,
        ids: &BTreeSet<DomainId>,
    ) -> Result<HashMap<DomainId, Product>, DomainError>;

    /// Loads one page of products plus pagination metadata.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable`.
    async fn find_page(&self, request: &PageRequest) -> Result<Page<Product>, DomainError>;

    /// Persists a new product and returns the freshly hydrated aggregate.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdentifier` for malformed references,
    /// `ConstraintViolation` when a reference does not exist, or
    /// `StorageUnavailable`.
    async fn create(&self, fields: NewProduct) -> Result<Product, DomainError>;

    /// Applies a patch; `None` if no row matched the id.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdentifier`, `ConstraintViolation`, or
    /// `StorageUnavailable`.
    async fn update(
        &self,
        id: &DomainId,
        patch: ProductPatch,
    ) -> Result<Option<Product>, DomainError>;

    /// Removes a product; `false` if no row matched.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdentifier` or `StorageUnavailable`.
    async fn delete(&self, id: &DomainId) -> Result<bool, DomainError>;
}
