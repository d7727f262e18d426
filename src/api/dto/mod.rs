//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization and query-string parsing.

pub mod dashboard;
pub mod health;
