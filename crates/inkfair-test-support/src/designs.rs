//! `DesignRepository` doubles.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use inkfair_core::error::DomainError;
use inkfair_core::id::{self, DomainId, StorageKey};
use inkfair_core::page::{Page, PageRequest};
use inkfair_designs::domain::aggregates::{Design, DesignPatch, NewDesign};
use inkfair_designs::domain::repository::DesignRepository;

#[derive(Debug, Default)]
struct State {
    rows: BTreeMap<StorageKey, Design>,
    next_key: StorageKey,
    find_by_ids_calls: Vec<BTreeSet<DomainId>>,
}

/// In-memory `DesignRepository` with `find_by_ids` call capture.
#[derive(Debug, Default)]
pub struct InMemoryDesignRepository {
    state: Mutex<State>,
}

impl InMemoryDesignRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `find_by_ids` argument seen so far, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn find_by_ids_calls(&self) -> Vec<BTreeSet<DomainId>> {
        self.state.lock().unwrap().find_by_ids_calls.clone()
    }
}

#[async_trait]
impl DesignRepository for InMemoryDesignRepository {
    async fn find_by_id(&self, id: &DomainId) -> Result<Option<Design>, DomainError> {
        let key = id::to_storage(id)?;
        Ok(self.state.lock().unwrap().rows.get(&key).cloned())
    }

    async fn find_by_ids(
        &self,
        ids: &BTreeSet<DomainId>,
    ) -> Result<HashMap<DomainId, Design>, DomainError> {
        let mut state = self.state.lock().unwrap();
        state.find_by_ids_calls.push(ids.clone());

        let mut found = HashMap::new();
        for domain_id in ids {
            let key = id::to_storage(domain_id)?;
            if let Some(row) = state.rows.get(&key) {
                found.insert(domain_id.clone(), row.clone());
            }
        }
        Ok(found)
    }

    async fn find_page(&self, request: &PageRequest) -> Result<Page<Design>, DomainError> {
        let state = self.state.lock().unwrap();
        let total = u64::try_from(state.rows.len()).unwrap();
        let items = state
            .rows
            .values()
            .skip(usize::try_from(request.offset()).unwrap())
            .take(request.per_page() as usize)
            .cloned()
            .collect();
        Ok(Page::new(items, request, total))
    }

    async fn create(&self, fields: NewDesign) -> Result<Design, DomainError> {
        let mut state = self.state.lock().unwrap();
        state.next_key += 1;
        let key = state.next_key;
        let design = Design {
            id: id::to_domain(key),
            title: fields.title,
            preview_url: fields.preview_url,
            created_at: Utc::now(),
        };
        state.rows.insert(key, design.clone());
        Ok(design)
    }

    async fn update(
        &self,
        id: &DomainId,
        patch: DesignPatch,
    ) -> Result<Option<Design>, DomainError> {
        let key = id::to_storage(id)?;
        let mut state = self.state.lock().unwrap();
        let Some(row) = state.rows.get_mut(&key) else {
            return Ok(None);
        };

        if let Some(title) = patch.title {
            row.title = title;
        }
        if let Some(preview_url) = patch.preview_url {
            row.preview_url = Some(preview_url);
        }
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: &DomainId) -> Result<bool, DomainError> {
        let key = id::to_storage(id)?;
        Ok(self.state.lock().unwrap().rows.remove(&key).is_some())
    }
}

/// A `DesignRepository` whose every call fails with `StorageUnavailable`.
#[derive(Debug)]
pub struct FailingDesignRepository;

#[async_trait]
impl DesignRepository for FailingDesignRepository {
    async fn find_by_id(&self, _id: &DomainId) -> Result<Option<Design>, DomainError> {
        Err(DomainError::StorageUnavailable("connection refused".into()))
    }

    async fn find_by_ids(
        &self,
        _ids: &BTreeSet<DomainId>,
    ) -> Result<HashMap<DomainId, Design>, DomainError> {
        Err(DomainError::StorageUnavailable("connection refused".into()))
    }

    async fn find_page(&self, _request: &PageRequest) -> Result<Page<Design>, DomainError> {
        Err(DomainError::StorageUnavailable("connection refused".into()))
    }

    async fn create(&self, _fields: NewDesign) -> Result<Design, DomainError> {
        Err(DomainError::StorageUnavailable("connection refused".into()))
    }

    async fn update(
        &self,
        _id: &DomainId,
        _patch: DesignPatch,
    ) -> Result<Option<Design>, DomainError> {
        Err(DomainError::StorageUnavailable("connection refused".into()))
    }

    async fn delete(&self, _id: &DomainId) -> Result<bool, DomainError> {
        Err(DomainError::StorageUnavailable("connection refused".into()))
    }
}
