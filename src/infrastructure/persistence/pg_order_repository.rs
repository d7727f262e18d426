//! PostgreSQL implementation of the order repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Order, OrderStatus, SaleStatuses};
use crate::domain::repositories::{OrderFilter, OrderRepository};
use crate::domain::stats::OrderTotals;
use crate::error::AppError;

/// PostgreSQL repository for order reporting queries.
///
/// Amounts are stored as `NUMERIC(12, 2)`, summed exactly in the database and
/// converted to `FLOAT8` only in the result row.
pub struct PgOrderRepository {
    pool: Arc<PgPool>,
}

impl PgOrderRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TotalsRow {
    order_count: i64,
    order_amount: f64,
    sale_count: i64,
    sale_amount: f64,
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    status: String,
    amount: Option<f64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = AppError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status: OrderStatus = row.status.parse().map_err(|e| {
            AppError::internal(
                format!("Corrupt order row: {e}"),
                json!({ "order_id": row.id }),
            )
        })?;

        Ok(Order::new(
            row.id,
            status,
            row.amount,
            row.created_at,
            row.updated_at,
        ))
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn aggregate_totals(
        &self,
        sale_statuses: &SaleStatuses,
    ) -> Result<OrderTotals, AppError> {
        let row = sqlx::query_as::<_, TotalsRow>(
            r#"
            SELECT
                COUNT(*) AS order_count,
                COALESCE(SUM(amount), 0)::FLOAT8 AS order_amount,
                COUNT(*) FILTER (WHERE status = ANY($1)) AS sale_count,
                COALESCE(SUM(amount) FILTER (WHERE status = ANY($1)), 0)::FLOAT8 AS sale_amount
            FROM orders
            "#,
        )
        .bind(sale_statuses.as_strings())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(OrderTotals {
            order_count: row.order_count,
            order_amount: row.order_amount,
            sale_count: row.sale_count,
            sale_amount: row.sale_amount,
        })
    }

    async fn count(&self, filter: &OrderFilter) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM orders
            WHERE ($1::timestamptz IS NULL OR created_at >= $1)
              AND ($2::timestamptz IS NULL OR created_at <= $2)
            "#,
        )
        .bind(filter.created_from)
        .bind(filter.created_to)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn find(
        &self,
        filter: &OrderFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Order>, AppError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, status, amount::FLOAT8 AS amount, created_at, updated_at
            FROM orders
            WHERE ($1::timestamptz IS NULL OR created_at >= $1)
              AND ($2::timestamptz IS NULL OR created_at <= $2)
            ORDER BY created_at DESC, id DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(filter.created_from)
        .bind(filter.created_to)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
