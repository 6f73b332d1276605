//! In-app notification routes for staff.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use domain::models::Notification;
use persistence::repositories::NotificationRepository;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminAuth;
use crate::response::ApiResponse;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub unread_only: bool,
}

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub unread: i64,
}

/// The authenticated staff member's notifications, newest first.
///
/// GET /api/v1/admin/notifikasi
pub async fn list(
    State(state): State<AppState>,
    auth: AdminAuth,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<Notification>>>, ApiError> {
    let repo = NotificationRepository::new(state.pool.clone());
    let notifications = repo.list_for_admin(auth.admin_id, query.unread_only).await?;
    Ok(Json(ApiResponse::ok("Daftar notifikasi", notifications)))
}

/// Unread notification count, for the badge.
///
/// GET /api/v1/admin/notifikasi/count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AdminAuth,
) -> Result<Json<ApiResponse<UnreadCount>>, ApiError> {
    let repo = NotificationRepository::new(state.pool.clone());
    let unread = repo.count_unread(auth.admin_id).await?;
    Ok(Json(ApiResponse::ok("Jumlah belum dibaca", UnreadCount { unread })))
}

/// Mark one notification read. Marking an already-read notification
/// succeeds without change.
///
/// PATCH /api/v1/admin/notifikasi/:id/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AdminAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let repo = NotificationRepository::new(state.pool.clone());
    // An already-read row still matches the update, so zero rows only
    // means the notification does not exist or belongs to someone else.
    let updated = repo.mark_read(auth.admin_id, id).await?;
    if updated == 0 {
        return Err(ApiError::NotFound("Notifikasi tidak ditemukan".to_string()));
    }

    Ok(Json(ApiResponse::message("Notifikasi ditandai dibaca")))
}

/// Mark all of the staff member's notifications read.
///
/// PATCH /api/v1/admin/notifikasi/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AdminAuth,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let repo = NotificationRepository::new(state.pool.clone());
    repo.mark_all_read(auth.admin_id).await?;
    Ok(Json(ApiResponse::message("Semua notifikasi ditandai dibaca")))
}
