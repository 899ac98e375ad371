//! Repository contract for the Shops context.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use inkfair_core::error::DomainError;
use inkfair_core::id::DomainId;
use inkfair_core::page::{Page, PageRequest};

use super::aggregates::{NewShop, Shop, ShopPatch};

/// Loads and persists `Shop` aggregate roots.
///
/// No method returns or accepts a related aggregate; relations cross this
/// boundary as `DomainId` values only, which keeps every query
/// single-table and bounded.
#[async_trait]
pub trait ShopRepository: Send + Sync {
    /// Loads one shop by id. At most one query, no joined relations.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdentifier` for a malformed id, or
    /// `StorageUnavailable` on transport failure.
    async fn find_by_id(&self, id: &DomainId) -> Result<Option<Shop>, DomainError>;

    /// Loads many shops in exactly one query, regardless of input size.
    /// Missing ids are simply absent from the result mapping.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdentifier` for a malformed id, or
    /// `StorageUnavailable` on transport failure.
    async fn find_by_ids(
        &self,
        ids: &BTreeSet<DomainId>,
    ) -> Result<HashMap<DomainId, Shop>, DomainError>;

    /// Loads one page of shops plus pagination metadata.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable` on transport failure.
    async fn find_page(&self, request: &PageRequest) -> Result<Page<Shop>, DomainError>;

    /// Persists a new shop and returns the freshly hydrated aggregate.
    ///
    /// # Errors
    ///
    /// Returns `ConstraintViolation` on a uniqueness failure (the slug),
    /// or `StorageUnavailable` on transport failure.
    async fn create(&self, fields: NewShop) -> Result<Shop, DomainError>;

    /// Applies a patch and returns the replacement aggregate, or `None`
    /// if no row matched the id.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdentifier`, `ConstraintViolation`, or
    /// `StorageUnavailable`.
    async fn update(&self, id: &DomainId, patch: ShopPatch) -> Result<Option<Shop>, DomainError>;

    /// Removes a shop; `false` if no row matched.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdentifier` or `StorageUnavailable`.
    async fn delete(&self, id: &DomainId) -> Result<bool, DomainError>;
}
