//! Query parameters and response body for `GET /dashboard`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, DisplayFromStr, serde_as};

use crate::application::services::DashboardSummary;
use crate::domain::entities::{Order, OrderStatus};
use crate::domain::pagination::{DEFAULT_LIMIT, DEFAULT_PAGE, Pagination};
use crate::domain::repositories::OrderFilter;
use crate::error::AppError;

/// Dashboard query parameters.
///
/// `page` and `limit` that are missing or not numbers fall back to their
/// defaults, as does a `page` below 1. A `limit` below 1 is rejected by
/// [`Pagination::new`].
/// Dates are kept raw and resolved by [`OrderFilter::from_query`].
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    #[serde_as(as = "DefaultOnError<Option<DisplayFromStr>>")]
    #[serde(default)]
    pub page: Option<i64>,

    #[serde_as(as = "DefaultOnError<Option<DisplayFromStr>>")]
    #[serde(default)]
    pub limit: Option<i64>,

    #[serde(default)]
    pub start_date: Option<String>,

    #[serde(default)]
    pub end_date: Option<String>,
}

impl DashboardQuery {
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a limit below 1.
    pub fn pagination(&self) -> Result<Pagination, AppError> {
        Pagination::new(
            self.page
                .filter(|page| *page >= 1)
                .unwrap_or(i64::from(DEFAULT_PAGE)),
            self.limit.unwrap_or(i64::from(DEFAULT_LIMIT)),
        )
    }

    pub fn filter(&self) -> OrderFilter {
        OrderFilter::from_query(self.start_date.as_deref(), self.end_date.as_deref())
    }
}

/// A single order in the listing.
#[derive(Debug, Serialize)]
pub struct OrderItem {
    pub id: i64,
    pub status: OrderStatus,
    pub amount: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderItem {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            status: order.status,
            amount: order.amount,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

/// Sales figures merged with one page of orders.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub orders_total: f64,
    pub orders_count: i64,
    pub sales_total: f64,
    pub sales_count: i64,
    pub average_ticket: f64,
    pub orders: Vec<OrderItem>,
    pub has_more: bool,
    pub limit: u32,
    pub page: u32,
    pub total: i64,
    pub total_pages: i64,
}

impl From<DashboardSummary> for DashboardResponse {
    fn from(summary: DashboardSummary) -> Self {
        let DashboardSummary {
            stats,
            page,
            pagination,
        } = summary;

        Self {
            orders_total: stats.total_order_amount,
            orders_count: stats.total_orders,
            sales_total: stats.total_sales_amount,
            sales_count: stats.total_sales,
            average_ticket: stats.average_sale_amount,
            orders: page.orders.into_iter().map(OrderItem::from).collect(),
            has_more: page.has_more,
            limit: pagination.limit(),
            page: pagination.page(),
            total: page.total,
            total_pages: page.total_pages,
        }
    }
}
