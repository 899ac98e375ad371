//! Inkfair Store — PostgreSQL repository implementations.
//!
//! Each repository loads and persists exactly one aggregate type from its
//! own table: single-table queries only, writes inside a transaction. The
//! identifier codec converts between numeric keys and `DomainId` strings
//! at this edge in both directions; no numeric key leaves this crate.

mod error;
pub mod pg_design_repository;
pub mod pg_product_repository;
pub mod pg_shop_repository;
pub mod schema;

pub use pg_design_repository::PgDesignRepository;
pub use pg_product_repository::PgProductRepository;
pub use pg_shop_repository::PgShopRepository;
