//! Repository trait for read-only order queries.

use crate::domain::entities::{Order, SaleStatuses};
use crate::domain::stats::OrderTotals;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Creation-date window for order listings.
///
/// Both bounds are inclusive. A missing bound leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
}

impl OrderFilter {
    pub fn new(created_from: Option<DateTime<Utc>>, created_to: Option<DateTime<Utc>>) -> Self {
        Self {
            created_from,
            created_to,
        }
    }

    /// Builds a filter from raw `start_date` / `end_date` query values.
    ///
    /// The start bound is the parsed instant (midnight UTC for a bare date).
    /// The end bound is pushed to 23:59:59.999 UTC of its day so the whole end
    /// date is included. Empty or unparseable values leave the bound open.
    pub fn from_query(start_date: Option<&str>, end_date: Option<&str>) -> Self {
        let created_from = start_date.and_then(|raw| parse_bound(raw, "start_date"));
        let created_to = end_date
            .and_then(|raw| parse_bound(raw, "end_date"))
            .and_then(end_of_day);

        Self {
            created_from,
            created_to,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.created_from.is_none() && self.created_to.is_none()
    }

    /// Whether `created_at` falls inside the window.
    pub fn matches(&self, created_at: DateTime<Utc>) -> bool {
        self.created_from.is_none_or(|from| created_at >= from)
            && self.created_to.is_none_or(|to| created_at <= to)
    }
}

/// Accepts `YYYY-MM-DD`, RFC 3339, or a naive `YYYY-MM-DDTHH:MM:SS[.fff]` read as UTC.
fn parse_bound(raw: &str, param: &str) -> Option<DateTime<Utc>> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN).and_utc());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    tracing::warn!(param, value, "Ignoring malformed date filter");
    None
}

fn end_of_day(instant: DateTime<Utc>) -> Option<DateTime<Utc>> {
    instant
        .date_naive()
        .and_hms_milli_opt(23, 59, 59, 999)
        .map(|naive| naive.and_utc())
}

/// Repository interface for the order store.
///
/// Exposes the three read primitives the dashboard needs (one aggregation,
/// one filtered count, one filtered page fetch) plus a liveness ping.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgOrderRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_order.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Aggregates counts and amounts over all orders in a single query.
    ///
    /// Sales are the orders whose status is in `sale_statuses`. Missing
    /// amounts count as zero.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn aggregate_totals(&self, sale_statuses: &SaleStatuses)
    -> Result<OrderTotals, AppError>;

    /// Counts orders matching the filter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self, filter: &OrderFilter) -> Result<i64, AppError>;

    /// Fetches one page of matching orders, newest first.
    ///
    /// Ties on `created_at` are broken by descending `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find(
        &self,
        filter: &OrderFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Order>, AppError>;

    /// Cheap round trip proving the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn ping(&self) -> Result<(), AppError>;
}
