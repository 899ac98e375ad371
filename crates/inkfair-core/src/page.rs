//! Pagination types shared by all repositories.

use serde::Serialize;

/// Default page size for listing endpoints.
pub const DEFAULT_PER_PAGE: u32 = 24;

/// Upper bound on the page size a caller may request.
pub const MAX_PER_PAGE: u32 = 100;

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Builds a request, clamping `page` to at least 1 and `per_page` into
    /// `1..=MAX_PER_PAGE`.
    #[must_use]
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// The requested page, 1-based.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// The requested page size.
    #[must_use]
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Row offset of the first item on this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PER_PAGE)
    }
}

/// One page of aggregates plus pagination metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// The rows on this page, in query order.
    pub items: Vec<T>,
    /// The page these rows belong to, 1-based.
    pub current_page: u32,
    /// The last page that holds at least one row (1 for an empty table).
    pub last_page: u32,
    /// The page size the rows were fetched with.
    pub per_page: u32,
    /// Total row count across all pages.
    pub total: u64,
}

impl<T> Page<T> {
    /// Builds a page from one page of rows and the matching total count.
    #[must_use]
    pub fn new(items: Vec<T>, request: &PageRequest, total: u64) -> Self {
        let last_page = u32::try_from(total.div_ceil(u64::from(request.per_page())))
            .unwrap_or(u32::MAX)
            .max(1);
        Self {
            items,
            current_page: request.page(),
            last_page,
            per_page: request.per_page(),
            total,
        }
    }

    /// Maps the page items while keeping the metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            last_page: self.last_page,
            per_page: self.per_page,
            total: self.total,
        }
    }
}
