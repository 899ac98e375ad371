//! `ProductRepository` doubles.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use inkfair_catalog::domain::aggregates::{NewProduct, Product, ProductPatch};
use inkfair_catalog::domain::repository::ProductRepository;
use inkfair_core::error::DomainError;
use inkfair_core::id::{self, DomainId, StorageKey};
use inkfair_core::page::{Page, PageRequest};

#[derive(Debug, Default)]
struct State {
    rows: BTreeMap<StorageKey, Product>,
    next_key: StorageKey,
    find_by_ids_calls: Vec<BTreeSet<DomainId>>,
}

/// In-memory `ProductRepository` with `find_by_ids` call capture.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    state: Mutex<State>,
}

impl InMemoryProductRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored products.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().rows.len()
    }

    /// Whether the repository is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
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
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: &DomainId) -> Result<Option<Product>, DomainError> {
        let key = id::to_storage(id)?;
        Ok(self.state.lock().unwrap().rows.get(&key).cloned())
    }

    async fn find_by_ids(
        &self,
        ids: &BTreeSet<DomainId>,
    ) -> Result<HashMap<DomainId, Product>, DomainError> {
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

    async fn find_page(&self, request: &PageRequest) -> Result<Page<Product>, DomainError> {
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

    async fn create(&self, fields: NewProduct) -> Result<Product, DomainError> {
        // Malformed references would trip the codec at the real storage
        // edge; mirror that here.
        id::to_storage(&fields.shop_id)?;
        if let Some(design_id) = &fields.design_id {
            id::to_storage(design_id)?;
        }

        let mut state = self.state.lock().unwrap();
        state.next_key += 1;
        let key = state.next_key;
        let now = Utc::now();
        let product = Product {
            id: id::to_domain(key),
            shop_id: fields.shop_id,
            design_id: fields.design_id,
            title: fields.title,
            description: fields.description,
            price_cents: fields.price_cents,
            currency: fields.currency,
            created_at: now,
            updated_at: now,
        };
        state.rows.insert(key, product.clone());
        Ok(product)
    }

    async fn update(
        &self,
        id: &DomainId,
        patch: ProductPatch,
    ) -> Result<Option<Product>, DomainError> {
        let key = id::to_storage(id)?;
        let mut state = self.state.lock().unwrap();
        let Some(row) = state.rows.get_mut(&key) else {
            return Ok(None);
        };

        if let Some(title) = patch.title {
            row.title = title;
        }
        if let Some(description) = patch.description {
            row.description = Some(description);
        }
        if let Some(price_cents) = patch.price_cents {
            row.price_cents = price_cents;
        }
        row.updated_at = Utc::now();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: &DomainId) -> Result<bool, DomainError> {
        let key = id::to_storage(id)?;
        Ok(self.state.lock().unwrap().rows.remove(&key).is_some())
    }
}

/// A `ProductRepository` whose every call fails with `StorageUnavailable`.
#[derive(Debug)]
pub struct FailingProductRepository;

#[async_trait]
impl ProductRepository for FailingProductRepository {
    async fn find_by_id(&self, _id: &DomainId) -> Result<Option<Product>, DomainError> {
        Err(DomainError::StorageUnavailable("connection refused".into()))
    }

    async fn find_by_ids(
        &self,
        _ids: &BTreeSet<DomainId>,
    ) -> Result<HashMap<DomainId, Product>, DomainError> {
        Err(DomainError::StorageUnavailable("connection refused".into()))
    }

    async fn find_page(&self, _request: &PageRequest) -> Result<Page<Product>, DomainError> {
        Err(DomainError::StorageUnavailable("connection refused".into()))
    }

    async fn create(&self, _fields: NewProduct) -> Result<Product, DomainError> {
        Err(DomainError::StorageUnavailable("connection refused".into()))
    }

    async fn update(
        &self,
        _id: &DomainId,
        _patch: ProductPatch,
    ) -> Result<Option<Product>, DomainError> {
        Err(DomainError::StorageUnavailable("connection refused".into()))
    }

    async fn delete(&self, _id: &DomainId) -> Result<bool, DomainError> {
        Err(DomainError::StorageUnavailable("connection refused".into()))
    }
}
