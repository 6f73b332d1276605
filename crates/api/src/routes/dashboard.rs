//! Dashboard routes: status counts and recent submissions.

use axum::{extract::State, Json};
use domain::models::{DashboardStats, PermitRequest};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminAuth;
use crate::response::ApiResponse;

/// Request counts grouped by status, computed fresh on every call.
///
/// GET /api/v1/admin/dashboard/statistik
pub async fn statistics(
    State(state): State<AppState>,
    _auth: AdminAuth,
) -> Result<Json<ApiResponse<DashboardStats>>, ApiError> {
    let stats = state.request_service().statistics().await?;
    Ok(Json(ApiResponse::ok("Statistik permohonan", stats)))
}

/// The most recently submitted requests.
///
/// GET /api/v1/admin/dashboard/recent
pub async fn recent(
    State(state): State<AppState>,
    _auth: AdminAuth,
) -> Result<Json<ApiResponse<Vec<PermitRequest>>>, ApiError> {
    let requests = state.request_service().recent().await?;
    Ok(Json(ApiResponse::ok("Permohonan terbaru", requests)))
}
