//! `ShopRepository` doubles.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use inkfair_core::error::DomainError;
use inkfair_core::id::{self, DomainId, StorageKey};
use inkfair_core::page::{Page, PageRequest};
use inkfair_shops::domain::aggregates::{NewShop, Shop, ShopPatch};
use inkfair_shops::domain::repository::ShopRepository;

#[derive(Debug, Default)]
struct State {
    rows: BTreeMap<StorageKey, Shop>,
    next_key: StorageKey,
    find_by_ids_calls: Vec<BTreeSet<DomainId>>,
}

/// In-memory `ShopRepository`. Assigns sequential keys, enforces slug
/// uniqueness like the real table, and records every `find_by_ids`
/// argument so tests can assert the batch-query bound.
#[derive(Debug, Default)]
pub struct InMemoryShopRepository {
    state: Mutex<State>,
}

impl InMemoryShopRepository {
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
impl ShopRepository for InMemoryShopRepository {
    async fn find_by_id(&self, id: &DomainId) -> Result<Option<Shop>, DomainError> {
        let key = id::to_storage(id)?;
        Ok(self.state.lock().unwrap().rows.get(&key).cloned())
    }

    async fn find_by_ids(
        &self,
        ids: &BTreeSet<DomainId>,
    ) -> Result<HashMap<DomainId, Shop>, DomainError> {
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

    async fn find_page(&self, request: &PageRequest) -> Result<Page<Shop>, DomainError> {
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

    async fn create(&self, fields: NewShop) -> Result<Shop, DomainError> {
        let mut state = self.state.lock().unwrap();
        if state.rows.values().any(|shop| shop.slug == fields.slug) {
            return Err(DomainError::ConstraintViolation {
                field: Some("slug".to_owned()),
                message: format!("duplicate slug {:?}", fields.slug),
            });
        }

        state.next_key += 1;
        let key = state.next_key;
        let shop = Shop {
            id: id::to_domain(key),
            name: fields.name,
            slug: fields.slug,
            contact_email: fields.contact_email,
            showcase_product_id: None,
            created_at: Utc::now(),
        };
        state.rows.insert(key, shop.clone());
        Ok(shop)
    }

    async fn update(&self, id: &DomainId, patch: ShopPatch) -> Result<Option<Shop>, DomainError> {
        let key = id::to_storage(id)?;
        let mut state = self.state.lock().unwrap();
        let Some(row) = state.rows.get_mut(&key) else {
            return Ok(None);
        };

        if let Some(name) = patch.name {
            row.name = name;
        }
        if let Some(contact_email) = patch.contact_email {
            row.contact_email = contact_email;
        }
        if let Some(product_id) = patch.showcase_product_id {
            row.showcase_product_id = Some(product_id);
        }
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: &DomainId) -> Result<bool, DomainError> {
        let key = id::to_storage(id)?;
        Ok(self.state.lock().unwrap().rows.remove(&key).is_some())
    }
}

/// A `ShopRepository` whose every call fails with `StorageUnavailable`.
#[derive(Debug)]
pub struct FailingShopRepository;

#[async_trait]
impl ShopRepository for FailingShopRepository {
    async fn find_by_id(&self, _id: &DomainId) -> Result<Option<Shop>, DomainError> {
        Err(DomainError::StorageUnavailable("connection refused".into()))
    }

    async fn find_by_ids(
        &self,
        _ids: &BTreeSet<DomainId>,
    ) -> Result<HashMap<DomainId, Shop>, DomainError> {
        Err(DomainError::StorageUnavailable("connection refused".into()))
    }

    async fn find_page(&self, _request: &PageRequest) -> Result<Page<Shop>, DomainError> {
        Err(DomainError::StorageUnavailable("connection refused".into()))
    }

    async fn create(&self, _fields: NewShop) -> Result<Shop, DomainError> {
        Err(DomainError::StorageUnavailable("connection refused".into()))
    }

    async fn update(&self, _id: &DomainId, _patch: ShopPatch) -> Result<Option<Shop>, DomainError> {
        Err(DomainError::StorageUnavailable("connection refused".into()))
    }

    async fn delete(&self, _id: &DomainId) -> Result<bool, DomainError> {
        Err(DomainError::StorageUnavailable("connection refused".into()))
    }
}
