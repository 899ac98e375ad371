//! Marketplace database schema.

use sqlx::PgPool;

use inkfair_core::error::DomainError;

use crate::error::storage_error;

/// SQL to create the shops table.
pub const CREATE_SHOPS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS shops (
    id                  BIGSERIAL PRIMARY KEY,
    name                VARCHAR(255) NOT NULL,
    slug                VARCHAR(255) NOT NULL,
    contact_email       VARCHAR(255) NOT NULL,
    showcase_product_id BIGINT,
    created_at          TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT shops_slug_key UNIQUE (slug)
);
";

/// SQL to create the designs table.
pub const CREATE_DESIGNS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS designs (
    id          BIGSERIAL PRIMARY KEY,
    title       VARCHAR(255) NOT NULL,
    preview_url TEXT,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

/// SQL to create the products table.
pub const CREATE_PRODUCTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS products (
    id          BIGSERIAL PRIMARY KEY,
    shop_id     BIGINT NOT NULL,
    design_id   BIGINT,
    title       VARCHAR(255) NOT NULL,
    description TEXT,
    price_cents BIGINT NOT NULL,
    currency    VARCHAR(3) NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    CONSTRAINT products_shop_id_fkey
        FOREIGN KEY (shop_id) REFERENCES shops (id) ON DELETE CASCADE,
    CONSTRAINT products_design_id_fkey
        FOREIGN KEY (design_id) REFERENCES designs (id) ON DELETE SET NULL
);

CREATE INDEX IF NOT EXISTS idx_products_shop_id ON products (shop_id);
CREATE INDEX IF NOT EXISTS idx_products_design_id ON products (design_id);
";

/// Applies the schema at startup. Every statement is idempotent.
///
/// # Errors
///
/// Returns `DomainError::StorageUnavailable` if a statement fails.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), DomainError> {
    for statement in [CREATE_SHOPS_TABLE, CREATE_DESIGNS_TABLE, CREATE_PRODUCTS_TABLE] {
        sqlx::raw_sql(statement)
            .execute(pool)
            .await
            .map_err(storage_error)?;
    }
    Ok(())
}
