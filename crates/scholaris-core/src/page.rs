//! List query parameters and paginated response envelopes.
//!
//! Pagination is page-based: `pageNumber` (1-indexed, default 1) and
//! `pageSize` (default 10, capped at [`MAX_PAGE_SIZE`]). Validation of the
//! raw request parameters happens at the endpoint layer; by the time a
//! [`ListQuery`] reaches a store both numbers are known to be >= 1.
//!
//! # Example JSON Response
//!
//! ```json
//! {
//!   "data": [...],
//!   "meta": {
//!     "total": 42,
//!     "page": 2,
//!     "page_size": 10,
//!     "has_more": true
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::filter::{FilterCriteria, SortOrder};

/// Upper bound applied to `pageSize` after validation.
pub const MAX_PAGE_SIZE: i64 = 100;

/// A fully validated list query as passed to a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub criteria: Vec<FilterCriteria>,
    pub search_term: Option<String>,
    pub page_number: i64,
    pub page_size: i64,
    pub sort_field: Option<String>,
    pub sort_order: SortOrder,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            criteria: Vec::new(),
            search_term: None,
            page_number: 1,
            page_size: 10,
            sort_field: None,
            sort_order: SortOrder::Asc,
        }
    }
}

impl ListQuery {
    /// Number of records to skip for the requested page.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page_number - 1) * self.page_size
    }
}

/// Metadata about a paginated response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageMeta {
    /// Total number of matching records across all pages
    pub total: i64,
    /// Current page number (1-indexed)
    pub page: i64,
    /// Maximum records per page (the size that was applied)
    pub page_size: i64,
    /// Whether there are more records after this page
    pub has_more: bool,
}

/// One page of records plus its metadata.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Page {
    pub data: Vec<Value>,
    pub meta: PageMeta,
}

impl Page {
    /// Builds a page envelope from the records of one page and the total
    /// match count.
    #[must_use]
    pub fn new(data: Vec<Value>, total: i64, query: &ListQuery) -> Self {
        Self {
            data,
            meta: PageMeta {
                total,
                page: query.page_number,
                page_size: query.page_size,
                has_more: query.page_number * query.page_size < total,
            },
        }
    }
}
