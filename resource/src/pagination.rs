//! Server-reported pagination and the page a view asks for.

use crate::client::QueryParams;
use crate::error::OperationError;
use serde::{Deserialize, Serialize};

/// Default number of rows per page
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Pagination as reported by the server for the last successful list fetch
///
/// Values are trusted as-is; `has_next`/`has_previous` are not recomputed
/// from the page numbers unless the list is edited locally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Total number of entities matching the query
    pub total_count: u64,
    /// Number of pages at the current page size
    pub total_pages: u32,
    /// 1-based page number of the loaded items
    pub current_page: u32,
    /// Rows per page
    pub page_size: u32,
    /// Whether a later page exists
    pub has_next: bool,
    /// Whether an earlier page exists
    pub has_previous: bool,
}

impl Pagination {
    /// Zero-state used before the first fetch and after a failed one
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            total_count: 0,
            total_pages: 0,
            current_page: 0,
            page_size: 0,
            has_next: false,
            has_previous: false,
        }
    }

    /// Pagination for an endpoint that returned everything in one response
    #[must_use]
    pub fn single_page(request: PageRequest, item_count: usize) -> Self {
        let total_count = item_count as u64;
        Self {
            total_count,
            total_pages: u32::from(total_count > 0),
            current_page: request.current_page,
            page_size: request.page_size,
            has_next: false,
            has_previous: request.current_page > 1,
        }
    }

    /// Account for an entity inserted locally
    ///
    /// A pagination the server never reported (after a failed or cleared
    /// fetch) adopts the requested page geometry.
    pub fn record_added(&mut self, requested: PageRequest) {
        self.total_count = self.total_count.saturating_add(1);
        self.recompute_pages(requested);
    }

    /// Account for an entity removed locally
    pub fn record_removed(&mut self, requested: PageRequest) {
        self.total_count = self.total_count.saturating_sub(1);
        self.recompute_pages(requested);
    }

    fn recompute_pages(&mut self, requested: PageRequest) {
        if self.page_size == 0 {
            if requested.page_size == 0 {
                return;
            }
            self.page_size = requested.page_size;
            if self.current_page == 0 {
                self.current_page = requested.current_page;
            }
        }
        let pages = self.total_count.div_ceil(u64::from(self.page_size));
        self.total_pages = u32::try_from(pages).unwrap_or(u32::MAX);
        self.has_next = self.current_page < self.total_pages;
    }
}

/// The page a view wants to see
///
/// Kept apart from [`Pagination`] so that a failed fetch, which zeroes the
/// server-reported pagination, does not lose the requested page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// 1-based page number
    pub current_page: u32,
    /// Rows per page
    pub page_size: u32,
}

impl PageRequest {
    /// Request a specific page
    #[must_use]
    pub const fn new(current_page: u32, page_size: u32) -> Self {
        Self {
            current_page,
            page_size,
        }
    }

    /// First page at the given size
    #[must_use]
    pub const fn first(page_size: u32) -> Self {
        Self::new(1, page_size)
    }

    /// Check the list-fetch input constraints
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::Validation`] when the page number or the
    /// page size is zero.
    pub fn validate(&self) -> Result<(), OperationError> {
        if self.current_page < 1 {
            return Err(OperationError::Validation(
                "Page number must be at least 1".to_string(),
            ));
        }
        if self.page_size < 1 {
            return Err(OperationError::Validation(
                "Page size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Add `PageNumber` and `PageSize`
    pub fn append_to(&self, query: &mut QueryParams) {
        query.insert("PageNumber", self.current_page);
        query.insert("PageSize", self.page_size);
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// One page of entities with its pagination
#[derive(Clone, Debug, PartialEq)]
pub struct Page<R> {
    /// Entities in server order
    pub items: Vec<R>,
    /// Pagination reported alongside them
    pub pagination: Pagination,
}
