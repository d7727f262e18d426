#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use order_dashboard::application::services::{AuthService, DashboardService, hash_token};
use order_dashboard::domain::entities::{Order, OrderStatus, SaleStatuses};
use order_dashboard::domain::repositories::{
    ApiToken, OrderFilter, OrderRepository, TokenRepository,
};
use order_dashboard::domain::stats::OrderTotals;
use order_dashboard::error::AppError;
use order_dashboard::state::AppState;

pub const TEST_SECRET: &str = "test-signing-secret";
pub const TEST_TOKEN: &str = "test-token";

pub fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

pub fn order(id: i64, status: OrderStatus, amount: Option<f64>, created_at: DateTime<Utc>) -> Order {
    Order::new(id, status, amount, created_at, created_at)
}

/// `n` paid orders of 10.00, one hour apart starting 2024-01-01.
pub fn hourly_orders(n: usize) -> Vec<Order> {
    let base = utc(2024, 1, 1, 0);
    (0..n)
        .map(|i| {
            order(
                i as i64 + 1,
                OrderStatus::Paid,
                Some(10.0),
                base + Duration::hours(i as i64),
            )
        })
        .collect()
}

/// Order store held in memory with the same semantics as the PostgreSQL one.
pub struct InMemoryOrderRepository {
    orders: Vec<Order>,
}

impl InMemoryOrderRepository {
    pub fn new(orders: Vec<Order>) -> Self {
        Self { orders }
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn aggregate_totals(
        &self,
        sale_statuses: &SaleStatuses,
    ) -> Result<OrderTotals, AppError> {
        let mut totals = OrderTotals::default();
        for order in &self.orders {
            let amount = order.amount.unwrap_or(0.0);
            totals.order_count += 1;
            totals.order_amount += amount;
            if sale_statuses.contains(order.status) {
                totals.sale_count += 1;
                totals.sale_amount += amount;
            }
        }
        Ok(totals)
    }

    async fn count(&self, filter: &OrderFilter) -> Result<i64, AppError> {
        Ok(self
            .orders
            .iter()
            .filter(|o| filter.matches(o.created_at))
            .count() as i64)
    }

    async fn find(
        &self,
        filter: &OrderFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Order>, AppError> {
        let mut matching: Vec<Order> = self
            .orders
            .iter()
            .filter(|o| filter.matches(o.created_at))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Which repository call should fail.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    Aggregate,
    Count,
    Find,
    Ping,
}

/// Wraps an in-memory store and fails one primitive, counting calls.
pub struct FailingOrderRepository {
    inner: InMemoryOrderRepository,
    fail_on: FailOn,
    pub calls: AtomicUsize,
}

impl FailingOrderRepository {
    pub fn new(orders: Vec<Order>, fail_on: FailOn) -> Self {
        Self {
            inner: InMemoryOrderRepository::new(orders),
            fail_on,
            calls: AtomicUsize::new(0),
        }
    }

    fn check(&self, call: FailOn) -> Result<(), AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if call == self.fail_on {
            Err(AppError::internal(
                "Database connection failed: password authentication failed for user \"app\"",
                json!({ "host": "db.internal" }),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl OrderRepository for FailingOrderRepository {
    async fn aggregate_totals(
        &self,
        sale_statuses: &SaleStatuses,
    ) -> Result<OrderTotals, AppError> {
        self.check(FailOn::Aggregate)?;
        self.inner.aggregate_totals(sale_statuses).await
    }

    async fn count(&self, filter: &OrderFilter) -> Result<i64, AppError> {
        self.check(FailOn::Count)?;
        self.inner.count(filter).await
    }

    async fn find(
        &self,
        filter: &OrderFilter,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Order>, AppError> {
        self.check(FailOn::Find)?;
        self.inner.find(filter, offset, limit).await
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check(FailOn::Ping)?;
        self.inner.ping().await
    }
}

/// Token store that knows exactly one token: [`TEST_TOKEN`].
pub struct SingleTokenRepository;

#[async_trait]
impl TokenRepository for SingleTokenRepository {
    async fn validate_token(&self, token_hash: &str) -> Result<bool, AppError> {
        Ok(token_hash == hash_token(TEST_SECRET, TEST_TOKEN))
    }

    async fn update_last_used(&self, _token_hash: &str) -> Result<(), AppError> {
        Ok(())
    }

    async fn create_token(&self, _name: &str, _token_hash: &str) -> Result<ApiToken, AppError> {
        Err(AppError::internal("read-only test store", json!({})))
    }

    async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError> {
        Ok(vec![])
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<ApiToken>, AppError> {
        Ok(None)
    }

    async fn find_by_name(&self, _name: &str) -> Result<Option<ApiToken>, AppError> {
        Ok(None)
    }

    async fn revoke_token(&self, id: i64) -> Result<(), AppError> {
        Err(AppError::not_found("Token not found", json!({ "id": id })))
    }
}

pub fn create_test_state(orders: Arc<dyn OrderRepository>) -> AppState {
    create_test_state_with_statuses(orders, SaleStatuses::default())
}

pub fn create_test_state_with_statuses(
    orders: Arc<dyn OrderRepository>,
    sale_statuses: SaleStatuses,
) -> AppState {
    let tokens: Arc<dyn TokenRepository> = Arc::new(SingleTokenRepository);

    AppState::new(
        Arc::new(DashboardService::new(orders, sale_statuses)),
        Arc::new(AuthService::new(tokens, TEST_SECRET.to_string())),
    )
}

pub async fn insert_order(
    pool: &PgPool,
    status: &str,
    amount: Option<f64>,
    created_at: DateTime<Utc>,
) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO orders (status, amount, created_at, updated_at) \
         VALUES ($1, $2::FLOAT8::NUMERIC(12, 2), $3, $3) RETURNING id",
    )
    .bind(status)
    .bind(amount)
    .bind(created_at)
    .fetch_one(pool)
    .await
    .unwrap()
}
