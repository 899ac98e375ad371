//! HTTP route handlers, one module per bounded context.

use inkfair_core::page::{DEFAULT_PER_PAGE, PageRequest};
use serde::Deserialize;

pub mod designs;
pub mod health;
pub mod products;
pub mod shops;

/// Pagination query parameters shared by all listing endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    /// Requested page, 1-based.
    pub page: Option<u32>,
    /// Requested page size.
    pub per_page: Option<u32>,
}

impl PageParams {
    /// Converts to a clamped `PageRequest`.
    #[must_use]
    pub fn to_request(&self) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(1),
            self.per_page.unwrap_or(DEFAULT_PER_PAGE),
        )
    }
}
