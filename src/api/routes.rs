//! API route configuration.
//!
//! All routes here require Bearer token authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::dashboard_handler;
use crate::state::AppState;
use axum::{Router, routing::get};

/// Routes protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `GET /dashboard` - Sales statistics and a page of orders
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard_handler))
}
