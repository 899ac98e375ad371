//! `PostgreSQL` implementation of the `DesignRepository` trait.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use inkfair_core::error::DomainError;
use inkfair_core::id::{self, DomainId};
use inkfair_core::page::{Page, PageRequest};
use inkfair_designs::domain::aggregates::{Design, DesignPatch, NewDesign};
use inkfair_designs::domain::repository::DesignRepository;

use crate::error::storage_error;

const SELECT_DESIGN: &str = "SELECT id, title, preview_url, created_at FROM designs";

#[derive(Debug, sqlx::FromRow)]
struct DesignRow {
    id: i64,
    title: String,
    preview_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl DesignRow {
    fn into_design(self) -> Design {
        Design {
            id: id::to_domain(self.id),
            title: self.title,
            preview_url: self.preview_url,
            created_at: self.created_at,
        }
    }
}

/// PostgreSQL-backed design repository.
#[derive(Debug, Clone)]
pub struct PgDesignRepository {
    pool: PgPool,
}

impl PgDesignRepository {
    /// Creates a new `PgDesignRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DesignRepository for PgDesignRepository {
    async fn find_by_id(&self, design_id: &DomainId) -> Result<Option<Design>, DomainError> {
        let key = id::to_storage(design_id)?;
        let row = sqlx::query_as::<_, DesignRow>(&format!("{SELECT_DESIGN} WHERE id = $1"))
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(row.map(DesignRow::into_design))
    }

    async fn find_by_ids(
        &self,
        ids: &BTreeSet<DomainId>,
    ) -> Result<HashMap<DomainId, Design>, DomainError> {
        let mut keys = Vec::with_capacity(ids.len());
        for design_id in ids {
            keys.push(id::to_storage(design_id)?);
        }

        let rows = sqlx::query_as::<_, DesignRow>(&format!("{SELECT_DESIGN} WHERE id = ANY($1)"))
            .bind(&keys)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(rows
            .into_iter()
            .map(|row| (id::to_domain(row.id), row.into_design()))
            .collect())
    }

    async fn find_page(&self, request: &PageRequest) -> Result<Page<Design>, DomainError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM designs")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?;

        let rows = sqlx::query_as::<_, DesignRow>(&format!(
            "{SELECT_DESIGN} ORDER BY id LIMIT $1 OFFSET $2"
        ))
        .bind(i64::from(request.per_page()))
        .bind(i64::try_from(request.offset()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        let items = rows.into_iter().map(DesignRow::into_design).collect();
        Ok(Page::new(items, request, u64::try_from(total).unwrap_or_default()))
    }

    async fn create(&self, fields: NewDesign) -> Result<Design, DomainError> {
        let mut tx = self.pool.begin().await.map_err(storage_error)?;
        let row = sqlx::query_as::<_, DesignRow>(
            "INSERT INTO designs (title, preview_url) VALUES ($1, $2) \
             RETURNING id, title, preview_url, created_at",
        )
        .bind(&fields.title)
        .bind(fields.preview_url.as_deref())
        .fetch_one(&mut *tx)
        .await
        .map_err(storage_error)?;
        tx.commit().await.map_err(storage_error)?;

        Ok(row.into_design())
    }

    async fn update(
        &self,
        design_id: &DomainId,
        patch: DesignPatch,
    ) -> Result<Option<Design>, DomainError> {
        let key = id::to_storage(design_id)?;

        let mut tx = self.pool.begin().await.map_err(storage_error)?;
        let row = sqlx::query_as::<_, DesignRow>(
            "UPDATE designs SET \
                 title = COALESCE($2, title), \
                 preview_url = COALESCE($3, preview_url) \
             WHERE id = $1 \
             RETURNING id, title, preview_url, created_at",
        )
        .bind(key)
        .bind(patch.title.as_deref())
        .bind(patch.preview_url.as_deref())
        .fetch_optional(&mut *tx)
        .await
        .map_err(storage_error)?;
        tx.commit().await.map_err(storage_error)?;

        Ok(row.map(DesignRow::into_design))
    }

    async fn delete(&self, design_id: &DomainId) -> Result<bool, DomainError> {
        let key = id::to_storage(design_id)?;
        let result = sqlx::query("DELETE FROM designs WHERE id = $1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(result.rows_affected() > 0)
    }
}
