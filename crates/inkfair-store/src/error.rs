//! sqlx error mapping at the storage boundary.

use inkfair_core::error::DomainError;

/// Maps a sqlx error into the domain taxonomy: integrity failures become
/// `ConstraintViolation`, carrying the violated field when the constraint
/// name reveals it; everything else surfaces as `StorageUnavailable`.
pub(crate) fn storage_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation()
            || db_err.is_foreign_key_violation()
            || db_err.is_check_violation()
        {
            return DomainError::ConstraintViolation {
                field: db_err.constraint().and_then(field_from_constraint),
                message: db_err.message().to_owned(),
            };
        }
    }
    DomainError::StorageUnavailable(err.to_string())
}

/// Derives the violated column from Postgres's conventional constraint
/// naming: `<table>_<column>_key` for unique constraints and
/// `<table>_<column>_fkey` for foreign keys.
fn field_from_constraint(constraint: &str) -> Option<String> {
    let rest = constraint
        .strip_suffix("_fkey")
        .or_else(|| constraint.strip_suffix("_key"))?;

    for table in ["shops", "designs", "products"] {
        if let Some(column) = rest.strip_prefix(table).and_then(|r| r.strip_prefix('_')) {
            if !column.is_empty() {
                return Some(column.to_owned());
            }
        }
    }
    None
}
