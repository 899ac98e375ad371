//! Repository contract for the Designs context.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use inkfair_core::error::DomainError;
use inkfair_core::id::DomainId;
use inkfair_core::page::{Page, PageRequest};

use super::aggregates::{Design, DesignPatch, NewDesign};

/// Loads and persists `Design` aggregate roots. Same boundary rules as
/// every repository: single-table queries, relations as `DomainId` only.
#[async_trait]
pub trait DesignRepository: Send + Sync {
    /// Loads one design by id.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdentifier` or `StorageUnavailable`.
    async fn find_by_id(&self, id: &DomainId) -> Result<Option<Design>, DomainError>;

    /// Loads many designs in exactly one query; missing ids are absent
    /// from the result mapping.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdentifier` or `StorageUnavailable`.
    async fn find_by_ids(
        &self,
        ids: &BTreeSet<DomainId>,
    ) -> Result<HashMap<DomainId, Design>, DomainError>;

    /// Loads one page of designs plus pagination metadata.
    ///
    /// # Errors
    ///
    /// Returns `StorageUnavailable`.
    async fn find_page(&self, request: &PageRequest) -> Result<Page<Design>, DomainError>;

    /// Persists a new design.
    ///
    /// # Errors
    ///
    /// Returns `ConstraintViolation` or `StorageUnavailable`.
    async fn create(&self, fields: NewDesign) -> Result<Design, DomainError>;

    /// Applies a patch; `None` if no row matched.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdentifier`, `ConstraintViolation`, or
    /// `StorageUnavailable`.
    async fn update(&self, id: &DomainId, patch: DesignPatch)
    -> Result<Option<Design>, DomainError>;

    /// Removes a design; `false` if no row matched.
    ///
    /// # Errors
    ///
    /// Returns `InvalidIdentifier` or `StorageUnavailable`.
    async fn delete(&self, id: &DomainId) -> Result<bool, DomainError>;
}
