//! Shared application state injected into handlers and middleware.

use std::sync::Arc;

use crate::application::services::{AuthService, DashboardService};
use crate::domain::repositories::{OrderRepository, TokenRepository};

/// Services shared by all requests.
///
/// Repositories sit behind trait objects so tests can swap the PostgreSQL
/// implementations for in-memory ones.
#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: Arc<DashboardService<dyn OrderRepository>>,
    pub auth_service: Arc<AuthService<dyn TokenRepository>>,
}

impl AppState {
    pub fn new(
        dashboard_service: Arc<DashboardService<dyn OrderRepository>>,
        auth_service: Arc<AuthService<dyn TokenRepository>>,
    ) -> Self {
        Self {
            dashboard_service,
            auth_service,
        }
    }
}
