//! The uniform response wrapper every backend endpoint returns.

use crate::pagination::{PageRequest, Pagination};
use serde::{Deserialize, Serialize};

/// `{isSuccess, message, data, totalCount?, totalPages?, currentPage?,
/// pageSize?, hasNext?, hasPrevious?}`
///
/// Pagination fields only appear on list endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    /// Application-level success flag; `false` is a failure even on HTTP 2xx
    #[serde(default)]
    pub is_success: bool,
    /// Human-readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Payload; absent or `null` on failures and on some mutations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Total rows matching the query
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    /// Number of pages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<u32>,
    /// Page returned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<u32>,
    /// Rows per page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// Whether a later page exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_next: Option<bool>,
    /// Whether an earlier page exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_previous: Option<bool>,
}

impl<T> Envelope<T> {
    /// Successful envelope carrying `data`
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            is_success: true,
            message: None,
            data: Some(data),
            total_count: None,
            total_pages: None,
            current_page: None,
            page_size: None,
            has_next: None,
            has_previous: None,
        }
    }

    /// Successful envelope without data
    #[must_use]
    pub const fn empty_success() -> Self {
        Self {
            is_success: true,
            message: None,
            data: None,
            total_count: None,
            total_pages: None,
            current_page: None,
            page_size: None,
            has_next: None,
            has_previous: None,
        }
    }

    /// Failed envelope with a message
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            message: Some(message.into()),
            ..Self::empty_success()
        }
    }

    /// Attach all six pagination fields
    #[must_use]
    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.total_count = Some(pagination.total_count);
        self.total_pages = Some(pagination.total_pages);
        self.current_page = Some(pagination.current_page);
        self.page_size = Some(pagination.page_size);
        self.has_next = Some(pagination.has_next);
        self.has_previous = Some(pagination.has_previous);
        self
    }

    /// The message if it has any text in it
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }

    /// Whether the server sent any pagination field at all
    #[must_use]
    pub const fn is_paginated(&self) -> bool {
        self.total_count.is_some()
            || self.total_pages.is_some()
            || self.current_page.is_some()
            || self.page_size.is_some()
            || self.has_next.is_some()
            || self.has_previous.is_some()
    }

    /// Pagination as reported, with gaps filled from the request
    ///
    /// Un-paginated endpoints get [`Pagination::single_page`].
    #[must_use]
    pub fn pagination(&self, request: PageRequest, item_count: usize) -> Pagination {
        let fallback = Pagination::single_page(request, item_count);
        if !self.is_paginated() {
            return fallback;
        }

        Pagination {
            total_count: self.total_count.unwrap_or(fallback.total_count),
            total_pages: self.total_pages.unwrap_or(fallback.total_pages),
            current_page: self.current_page.unwrap_or(fallback.current_page),
            page_size: self.page_size.unwrap_or(fallback.page_size),
            has_next: self.has_next.unwrap_or(fallback.has_next),
            has_previous: self.has_previous.unwrap_or(fallback.has_previous),
        }
    }
}
