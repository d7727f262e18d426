//! Handler for the order dashboard.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::dto::dashboard::{DashboardQuery, DashboardResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Returns sales statistics together with one page of orders.
///
/// # Endpoint
///
/// `GET /dashboard`
///
/// # Query Parameters
///
/// - `page` (optional): Page number (default: 1, also used for values below 1)
/// - `limit` (optional): Orders per page (default: 10)
/// - `start_date` (optional): Earliest creation date, inclusive (`YYYY-MM-DD` or RFC3339)
/// - `end_date` (optional): Latest creation date, inclusive through 23:59:59.999 UTC
///
/// Non-numeric `page`/`limit` values fall back to their defaults and
/// malformed dates are ignored.
///
/// # Response
///
/// ```json
/// {
///   "orders_total": 1500.5, "orders_count": 20,
///   "sales_total": 1200.0, "sales_count": 15,
///   "average_ticket": 80.0,
///   "orders": [...], "has_more": true,
///   "limit": 10, "page": 1, "total": 20, "total_pages": 2
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if `limit` is below 1.
/// Returns 500 Internal Server Error with a generic message on storage failures.
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Query(params): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    let pagination = params.pagination()?;
    let filter = params.filter();

    let summary = state.dashboard_service.summary(pagination, filter).await?;

    Ok(Json(DashboardResponse::from(summary)))
}
