//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! # Repositories
//!
//! - [`PgOrderRepository`] - Order aggregation, counting and paging
//! - [`PgTokenRepository`] - API token storage and validation

pub mod pg_order_repository;
pub mod pg_token_repository;

pub use pg_order_repository::PgOrderRepository;
pub use pg_token_repository::PgTokenRepository;
