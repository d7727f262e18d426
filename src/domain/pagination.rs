//! Offset pagination for order listings.

use crate::error::AppError;
use serde_json::json;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// A validated page request.
///
/// Both `page` and `limit` are at least 1, so page arithmetic never divides
/// by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    limit: u32,
}

impl Pagination {
    /// Validates a page request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `page` or `limit` is below 1 or does
    /// not fit in a `u32`.
    pub fn new(page: i64, limit: i64) -> Result<Self, AppError> {
        if page < 1 {
            return Err(AppError::bad_request(
                "Page must be greater than 0",
                json!({ "page": page }),
            ));
        }

        if limit < 1 {
            return Err(AppError::bad_request(
                "Limit must be greater than 0",
                json!({ "limit": limit }),
            ));
        }

        let page = u32::try_from(page)
            .map_err(|_| AppError::bad_request("Page is too large", json!({ "page": page })))?;
        let limit = u32::try_from(limit)
            .map_err(|_| AppError::bad_request("Limit is too large", json!({ "limit": limit })))?;

        Ok(Self { page, limit })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of matching records to skip.
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Page counters derived from the filtered total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    pub total: i64,
    pub total_pages: i64,
    pub has_more: bool,
}

impl PageMeta {
    pub fn new(pagination: Pagination, total: i64) -> Self {
        let total = total.max(0);
        let limit = i64::from(pagination.limit());
        let total_pages = (total + limit - 1) / limit;

        Self {
            total,
            total_pages,
            has_more: i64::from(pagination.page()) < total_pages,
        }
    }
}
