//! Business logic services for the application layer.

pub mod auth_service;
pub mod dashboard_service;

pub use auth_service::{AuthService, hash_token};
pub use dashboard_service::{DashboardService, DashboardSummary, OrderPage};
