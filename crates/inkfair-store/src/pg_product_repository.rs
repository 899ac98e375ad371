//! `PostgreSQL` implementation of the `ProductRepository` trait.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use inkfair_catalog::domain::aggregates::{NewProduct, Product, ProductPatch};
use inkfair_catalog::domain::repository::ProductRepository;
use inkfair_core::error::DomainError;
use inkfair_core::id::{self, DomainId};
use inkfair_core::page::{Page, PageRequest};

use crate::error::storage_error;

const SELECT_PRODUCT: &str = "SELECT id, shop_id, design_id, title, description, price_cents, \
                              currency, created_at, updated_at FROM products";

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    shop_id: i64,
    design_id: Option<i64>,
    title: String,
    description: Option<String>,
    price_cents: i64,
    currency: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> Product {
        Product {
            id: id::to_domain(self.id),
            shop_id: id::to_domain(self.shop_id),
            design_id: id::to_domain_optional(self.design_id),
            title: self.title,
            description: self.description,
            price_cents: self.price_cents,
            currency: self.currency,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// PostgreSQL-backed product repository.
#[derive(Debug, Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    /// Creates a new `PgProductRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_by_id(&self, product_id: &DomainId) -> Result<Option<Product>, DomainError> {
        let key = id::to_storage(product_id)?;
        let row = sqlx::query_as::<_, ProductRow>(&format!("{SELECT_PRODUCT} WHERE id = $1"))
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(row.map(ProductRow::into_product))
    }

    async fn find_by_ids(
        &self,
        ids: &BTreeSet<DomainId>,
    ) -> Result<HashMap<DomainId, Product>, DomainError> {
        let mut keys = Vec::with_capacity(ids.len());
        for product_id in ids {
            keys.push(id::to_storage(product_id)?);
        }

        let rows = sqlx::query_as::<_, ProductRow>(&format!("{SELECT_PRODUCT} WHERE id = ANY($1)"))
            .bind(&keys)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(rows
            .into_iter()
            .map(|row| (id::to_domain(row.id), row.into_product()))
            .collect())
    }

    async fn find_page(&self, request: &PageRequest) -> Result<Page<Product>, DomainError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?;

        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "{SELECT_PRODUCT} ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(i64::from(request.per_page()))
        .bind(i64::try_from(request.offset()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        let items = rows.into_iter().map(ProductRow::into_product).collect();
        Ok(Page::new(items, request, u64::try_from(total).unwrap_or_default()))
    }

    async fn create(&self, fields: NewProduct) -> Result<Product, DomainError> {
        let shop_key = id::to_storage(&fields.shop_id)?;
        let design_key = match &fields.design_id {
            Some(design_id) => Some(id::to_storage(design_id)?),
            None => None,
        };

        let mut tx = self.pool.begin().await.map_err(storage_error)?;
        let row = sqlx::query_as::<_, ProductRow>(
            "INSERT INTO products (shop_id, design_id, title, description, price_cents, currency) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id, shop_id, design_id, title, description, price_cents, currency, \
                       created_at, updated_at",
        )
        .bind(shop_key)
        .bind(design_key)
        .bind(&fields.title)
        .bind(fields.description.as_deref())
        .bind(fields.price_cents)
        .bind(&fields.currency)
        .fetch_one(&mut *tx)
        .await
        .map_err(storage_error)?;
        tx.commit().await.map_err(storage_error)?;

        Ok(row.into_product())
    }

    async fn update(
        &self,
        product_id: &DomainId,
        patch: ProductPatch,
    ) -> Result<Option<Product>, DomainError> {
        let key = id::to_storage(product_id)?;

        let mut tx = self.pool.begin().await.map_err(storage_error)?;
        let row = sqlx::query_as::<_, ProductRow>(
            "UPDATE products SET \
                 title = COALESCE($2, title), \
                 description = COALESCE($3, description), \
                 price_cents = COALESCE($4, price_cents), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, shop_id, design_id, title, description, price_cents, currency, \
                       created_at, updated_at",
        )
        .bind(key)
        .bind(patch.title.as_deref())
        .bind(patch.description.as_deref())
        .bind(patch.price_cents)
        .fetch_optional(&mut *tx)
        .await
        .map_err(storage_error)?;
        tx.commit().await.map_err(storage_error)?;

        Ok(row.map(ProductRow::into_product))
    }

    async fn delete(&self, product_id: &DomainId) -> Result<bool, DomainError> {
        let key = id::to_storage(product_id)?;
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(result.rows_affected() > 0)
    }
}
