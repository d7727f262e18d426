//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data access; PostgreSQL implementations live
//! in `crate::infrastructure::persistence`. Mock implementations are generated
//! with `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`OrderRepository`] - Read-only order aggregation, counting and paging
//! - [`TokenRepository`] - API token authentication
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod order_repository;
pub mod token_repository;

pub use order_repository::{OrderFilter, OrderRepository};
pub use token_repository::{ApiToken, TokenRepository};

#[cfg(test)]
pub use order_repository::MockOrderRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
