//! `PostgreSQL` implementation of the `ShopRepository` trait.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use inkfair_core::error::DomainError;
use inkfair_core::id::{self, DomainId};
use inkfair_core::page::{Page, PageRequest};
use inkfair_shops::domain::aggregates::{NewShop, Shop, ShopPatch};
use inkfair_shops::domain::repository::ShopRepository;

use crate::error::storage_error;

const SELECT_SHOP: &str =
    "SELECT id, name, slug, contact_email, showcase_product_id, created_at FROM shops";

#[derive(Debug, sqlx::FromRow)]
struct ShopRow {
    id: i64,
    name: String,
    slug: String,
    contact_email: String,
    showcase_product_id: Option<i64>,
    created_at: DateTime<Utc>,
}

impl ShopRow {
    fn into_shop(self) -> Shop {
        Shop {
            id: id::to_domain(self.id),
            name: self.name,
            slug: self.slug,
            contact_email: self.contact_email,
            showcase_product_id: id::to_domain_optional(self.showcase_product_id),
            created_at: self.created_at,
        }
    }
}

/// PostgreSQL-backed shop repository.
#[derive(Debug, Clone)]
pub struct PgShopRepository {
    pool: PgPool,
}

impl PgShopRepository {
    /// Creates a new `PgShopRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShopRepository for PgShopRepository {
    async fn find_by_id(&self, shop_id: &DomainId) -> Result<Option<Shop>, DomainError> {
        let key = id::to_storage(shop_id)?;
        let row = sqlx::query_as::<_, ShopRow>(&format!("{SELECT_SHOP} WHERE id = $1"))
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(row.map(ShopRow::into_shop))
    }

    async fn find_by_ids(
        &self,
        ids: &BTreeSet<DomainId>,
    ) -> Result<HashMap<DomainId, Shop>, DomainError> {
        let mut keys = Vec::with_capacity(ids.len());
        for shop_id in ids {
            keys.push(id::to_storage(shop_id)?);
        }

        let rows = sqlx::query_as::<_, ShopRow>(&format!("{SELECT_SHOP} WHERE id = ANY($1)"))
            .bind(&keys)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(rows
            .into_iter()
            .map(|row| (id::to_domain(row.id), row.into_shop()))
            .collect())
    }

    async fn find_page(&self, request: &PageRequest) -> Result<Page<Shop>, DomainError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shops")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?;

        let rows =
            sqlx::query_as::<_, ShopRow>(&format!("{SELECT_SHOP} ORDER BY id LIMIT $1 OFFSET $2"))
                .bind(i64::from(request.per_page()))
                .bind(i64::try_from(request.offset()).unwrap_or(i64::MAX))
                .fetch_all(&self.pool)
                .await
                .map_err(storage_error)?;

        let items = rows.into_iter().map(ShopRow::into_shop).collect();
        Ok(Page::new(items, request, u64::try_from(total).unwrap_or_default()))
    }

    async fn create(&self, fields: NewShop) -> Result<Shop, DomainError> {
        let mut tx = self.pool.begin().await.map_err(storage_error)?;
        let row = sqlx::query_as::<_, ShopRow>(
            "INSERT INTO shops (name, slug, contact_email) VALUES ($1, $2, $3) \
             RETURNING id, name, slug, contact_email, showcase_product_id, created_at",
        )
        .bind(&fields.name)
        .bind(&fields.slug)
        .bind(&fields.contact_email)
        .fetch_one(&mut *tx)
        .await
        .map_err(storage_error)?;
        tx.commit().await.map_err(storage_error)?;

        Ok(row.into_shop())
    }

    async fn update(
        &self,
        shop_id: &DomainId,
        patch: ShopPatch,
    ) -> Result<Option<Shop>, DomainError> {
        let key = id::to_storage(shop_id)?;
        let showcase_key = match &patch.showcase_product_id {
            Some(product_id) => Some(id::to_storage(product_id)?),
            None => None,
        };

        let mut tx = self.pool.begin().await.map_err(storage_error)?;
        let row = sqlx::query_as::<_, ShopRow>(
            "UPDATE shops SET \
                 name = COALESCE($2, name), \
                 contact_email = COALESCE($3, contact_email), \
                 showcase_product_id = COALESCE($4, showcase_product_id) \
             WHERE id = $1 \
             RETURNING id, name, slug, contact_email, showcase_product_id, created_at",
        )
        .bind(key)
        .bind(patch.name.as_deref())
        .bind(patch.contact_email.as_deref())
        .bind(showcase_key)
        .fetch_optional(&mut *tx)
        .await
        .map_err(storage_error)?;
        tx.commit().await.map_err(storage_error)?;

        Ok(row.map(ShopRow::into_shop))
    }

    async fn delete(&self, shop_id: &DomainId) -> Result<bool, DomainError> {
        let key = id::to_storage(shop_id)?;
        let result = sqlx::query("DELETE FROM shops WHERE id = $1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_row_mapping_converts_keys_through_the_codec() {
        let row = ShopRow {
            id: 42,
            name: "Curio Prints".to_owned(),
            slug: "curio-prints".to_owned(),
            contact_email: "hello@curio.example".to_owned(),
            showcase_product_id: Some(7),
            created_at: Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
        };

        let shop = row.into_shop();

        assert_eq!(shop.id, DomainId::from("42"));
        assert_eq!(shop.showcase_product_id, Some(DomainId::from("7")));
        assert_eq!(shop.slug, "curio-prints");
    }

    #[test]
    fn test_row_mapping_propagates_null_showcase() {
        let row = ShopRow {
            id: 1,
            name: "n".to_owned(),
            slug: "s".to_owned(),
            contact_email: "e".to_owned(),
            showcase_product_id: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
        };

        assert!(row.into_shop().showcase_product_id.is_none());
    }
}
