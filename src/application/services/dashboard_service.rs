//! Order dashboard service: sales statistics and paginated listing.

use std::sync::Arc;

use crate::domain::entities::{Order, SaleStatuses};
use crate::domain::pagination::{PageMeta, Pagination};
use crate::domain::repositories::{OrderFilter, OrderRepository};
use crate::domain::stats::OrderStats;
use crate::error::AppError;

/// One page of orders with its pagination counters.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderPage {
    pub orders: Vec<Order>,
    pub total: i64,
    pub total_pages: i64,
    pub has_more: bool,
}

/// Everything the dashboard endpoint renders.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub stats: OrderStats,
    pub page: OrderPage,
    pub pagination: Pagination,
}

/// Read-only reporting over the order store.
///
/// Holds no mutable state; every call is an independent computation against
/// the repository.
pub struct DashboardService<R: OrderRepository + ?Sized> {
    repository: Arc<R>,
    sale_statuses: SaleStatuses,
}

impl<R: OrderRepository + ?Sized> DashboardService<R> {
    /// Creates a new dashboard service.
    pub fn new(repository: Arc<R>, sale_statuses: SaleStatuses) -> Self {
        Self {
            repository,
            sale_statuses,
        }
    }

    /// Computes global order and sales figures from one aggregation query.
    ///
    /// Independent of any pagination or date filter.
    ///
    /// # Errors
    ///
    /// Propagates repository errors unchanged.
    pub async fn compute_stats(&self) -> Result<OrderStats, AppError> {
        let totals = self
            .repository
            .aggregate_totals(&self.sale_statuses)
            .await?;

        Ok(OrderStats::from_totals(totals))
    }

    /// Lists one page of orders matching the filter, newest first.
    ///
    /// A page past the end yields no orders and `has_more = false`.
    ///
    /// # Errors
    ///
    /// Propagates repository errors unchanged.
    pub async fn list_page(
        &self,
        pagination: Pagination,
        filter: OrderFilter,
    ) -> Result<OrderPage, AppError> {
        let total = self.repository.count(&filter).await?;
        let meta = PageMeta::new(pagination, total);

        let orders = if pagination.offset() < meta.total {
            self.repository
                .find(&filter, pagination.offset(), i64::from(pagination.limit()))
                .await?
        } else {
            Vec::new()
        };

        Ok(OrderPage {
            orders,
            total: meta.total,
            total_pages: meta.total_pages,
            has_more: meta.has_more,
        })
    }

    /// Computes statistics and the requested page together.
    ///
    /// Both queries run concurrently; if either fails the whole call fails.
    ///
    /// # Errors
    ///
    /// Propagates the first repository error.
    pub async fn summary(
        &self,
        pagination: Pagination,
        filter: OrderFilter,
    ) -> Result<DashboardSummary, AppError> {
        let (stats, page) =
            tokio::try_join!(self.compute_stats(), self.list_page(pagination, filter))?;

        tracing::debug!(
            page = pagination.page(),
            limit = pagination.limit(),
            total = page.total,
            returned = page.orders.len(),
            "Dashboard summary computed"
        );

        Ok(DashboardSummary {
            stats,
            page,
            pagination,
        })
    }

    /// Checks that the order store answers. Used by the health check.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the store is unreachable.
    pub async fn storage_status(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::OrderStatus;
    use crate::domain::repositories::MockOrderRepository;
    use crate::domain::stats::OrderTotals;
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::json;

    fn orders(n: usize) -> Vec<Order> {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        (0..n)
            .map(|i| {
                let at = base + Duration::hours(i as i64);
                Order::new(i as i64 + 1, OrderStatus::Paid, Some(10.0), at, at)
            })
            .collect()
    }

    fn db_down() -> AppError {
        AppError::internal("Database connection failed", json!({}))
    }

    #[tokio::test]
    async fn test_compute_stats_uses_configured_sale_statuses() {
        let mut mock_repo = MockOrderRepository::new();

        mock_repo
            .expect_aggregate_totals()
            .withf(|statuses| {
                statuses.contains(OrderStatus::Paid) && statuses.contains(OrderStatus::Refunded)
            })
            .times(1)
            .returning(|_| {
                Ok(OrderTotals {
                    order_count: 10,
                    order_amount: 1000.0,
                    sale_count: 5,
                    sale_amount: 750.0,
                })
            });

        let statuses = SaleStatuses::parse("paid,refunded").unwrap();
        let service = DashboardService::new(Arc::new(mock_repo), statuses);

        let stats = service.compute_stats().await.unwrap();

        assert_eq!(stats.total_orders, 10);
        assert_eq!(stats.total_order_amount, 1000.0);
        assert_eq!(stats.total_sales, 5);
        assert_eq!(stats.total_sales_amount, 750.0);
        assert_eq!(stats.average_sale_amount, 150.0);
    }

    #[tokio::test]
    async fn test_compute_stats_propagates_errors() {
        let mut mock_repo = MockOrderRepository::new();
        mock_repo
            .expect_aggregate_totals()
            .times(1)
            .returning(|_| Err(db_down()));

        let service = DashboardService::new(Arc::new(mock_repo), SaleStatuses::default());

        let result = service.compute_stats().await;
        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_list_page_skips_and_limits() {
        let mut mock_repo = MockOrderRepository::new();

        mock_repo.expect_count().times(1).returning(|_| Ok(50));
        mock_repo
            .expect_find()
            .withf(|filter, offset, limit| filter.is_unbounded() && *offset == 10 && *limit == 10)
            .times(1)
            .returning(|_, _, _| Ok(orders(2)));

        let service = DashboardService::new(Arc::new(mock_repo), SaleStatuses::default());

        let page = service
            .list_page(Pagination::new(2, 10).unwrap(), OrderFilter::default())
            .await
            .unwrap();

        assert_eq!(page.orders.len(), 2);
        assert_eq!(page.total, 50);
        assert_eq!(page.total_pages, 5);
        assert!(page.has_more);
    }

    #[tokio::test]
    async fn test_list_page_passes_filter_to_count_and_find() {
        let filter = OrderFilter::from_query(Some("2024-01-10"), Some("2024-01-31"));
        let mut mock_repo = MockOrderRepository::new();

        mock_repo
            .expect_count()
            .withf(move |f| *f == filter)
            .times(1)
            .returning(|_| Ok(1));
        mock_repo
            .expect_find()
            .withf(move |f, _, _| *f == filter)
            .times(1)
            .returning(|_, _, _| Ok(orders(1)));

        let service = DashboardService::new(Arc::new(mock_repo), SaleStatuses::default());

        let page = service
            .list_page(Pagination::default(), filter)
            .await
            .unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_more);
    }

    #[tokio::test]
    async fn test_list_page_past_the_end_is_empty() {
        let mut mock_repo = MockOrderRepository::new();

        mock_repo.expect_count().times(1).returning(|_| Ok(25));
        mock_repo.expect_find().never();

        let service = DashboardService::new(Arc::new(mock_repo), SaleStatuses::default());

        let page = service
            .list_page(Pagination::new(4, 10).unwrap(), OrderFilter::default())
            .await
            .unwrap();

        assert!(page.orders.is_empty());
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
        assert!(!page.has_more);
    }

    #[tokio::test]
    async fn test_list_page_count_failure_stops_fetch() {
        let mut mock_repo = MockOrderRepository::new();

        mock_repo.expect_count().times(1).returning(|_| Err(db_down()));
        mock_repo.expect_find().never();

        let service = DashboardService::new(Arc::new(mock_repo), SaleStatuses::default());

        let result = service
            .list_page(Pagination::default(), OrderFilter::default())
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_summary_merges_both_results() {
        let mut mock_repo = MockOrderRepository::new();

        mock_repo.expect_aggregate_totals().times(1).returning(|_| {
            Ok(OrderTotals {
                order_count: 3,
                order_amount: 30.0,
                sale_count: 3,
                sale_amount: 30.0,
            })
        });
        mock_repo.expect_count().times(1).returning(|_| Ok(3));
        mock_repo
            .expect_find()
            .times(1)
            .returning(|_, _, _| Ok(orders(3)));

        let service = DashboardService::new(Arc::new(mock_repo), SaleStatuses::default());

        let summary = service
            .summary(Pagination::default(), OrderFilter::default())
            .await
            .unwrap();

        assert_eq!(summary.stats.total_orders, 3);
        assert_eq!(summary.stats.average_sale_amount, 10.0);
        assert_eq!(summary.page.orders.len(), 3);
        assert_eq!(summary.pagination, Pagination::default());
    }

    #[tokio::test]
    async fn test_summary_fails_when_stats_fail() {
        let mut mock_repo = MockOrderRepository::new();

        mock_repo
            .expect_aggregate_totals()
            .returning(|_| Err(db_down()));
        mock_repo.expect_count().returning(|_| Ok(3));
        mock_repo.expect_find().returning(|_, _, _| Ok(orders(3)));

        let service = DashboardService::new(Arc::new(mock_repo), SaleStatuses::default());

        let result = service
            .summary(Pagination::default(), OrderFilter::default())
            .await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_summary_fails_when_listing_fails() {
        let mut mock_repo = MockOrderRepository::new();

        mock_repo
            .expect_aggregate_totals()
            .returning(|_| Ok(OrderTotals::default()));
        mock_repo.expect_count().returning(|_| Err(db_down()));

        let service = DashboardService::new(Arc::new(mock_repo), SaleStatuses::default());

        let result = service
            .summary(Pagination::default(), OrderFilter::default())
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_storage_status_pings_without_counting() {
        let mut mock_repo = MockOrderRepository::new();
        mock_repo.expect_ping().times(1).returning(|| Ok(()));
        mock_repo.expect_count().never();
        mock_repo.expect_find().never();

        let service = DashboardService::new(Arc::new(mock_repo), SaleStatuses::default());

        assert!(service.storage_status().await.is_ok());
    }

    #[tokio::test]
    async fn test_storage_status_propagates_ping_failure() {
        let mut mock_repo = MockOrderRepository::new();
        mock_repo
            .expect_ping()
            .times(1)
            .returning(|| Err(AppError::internal("connection refused", json!({}))));

        let service = DashboardService::new(Arc::new(mock_repo), SaleStatuses::default());

        assert!(matches!(
            service.storage_status().await,
            Err(AppError::Internal { .. })
        ));
    }
}
