//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Number of items per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl PageRequest {
    /// Calculates the offset into the full result set.
    #[must_use]
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(self.limit())
    }

    /// Returns the number of items per page, never zero. `per_page` comes
    /// straight from the query string, and a zero there must not turn
    /// every page empty.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.per_page.max(1) as usize
    }
}

/// A page of results with total counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Total number of items across all pages.
    pub total: usize,
    /// Current page (1-indexed).
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of pages.
    pub total_pages: u32,
}

impl<T> PageResponse<T> {
    /// Builds a page response from a full, already-filtered result set.
    #[must_use]
    pub fn from_items(all: Vec<T>, request: &PageRequest) -> Self {
        let total = all.len();
        let per_page = request.per_page.max(1);
        let total_pages = u32::try_from(total.div_ceil(request.limit())).unwrap_or(u32::MAX);
        let items = all
            .into_iter()
            .skip(request.offset())
            .take(request.limit())
            .collect();
        Self {
            items,
            total,
            page: request.page,
            per_page,
            total_pages,
        }
    }
}
