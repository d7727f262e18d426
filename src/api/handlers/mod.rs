//! HTTP request handlers for API endpoints.

pub mod dashboard;
pub mod health;

pub use dashboard::dashboard_handler;
pub use health::health_handler;
