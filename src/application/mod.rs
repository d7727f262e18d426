//! Application layer services implementing business logic.
//!
//! Services consume repository traits and give HTTP handlers and the admin CLI
//! a narrow API.
//!
//! # Available Services
//!
//! - [`services::dashboard_service::DashboardService`] - Sales statistics and order listing
//! - [`services::auth_service::AuthService`] - API token authentication

pub mod services;
