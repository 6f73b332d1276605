//! Staff account management routes, super admin only.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::{Admin, CreateAdminRequest, ResetPasswordRequest, UpdateAdminRequest};
use persistence::repositories::AdminRepository;
use shared::password::hash_password;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminAuth;
use crate::response::ApiResponse;

/// List all staff accounts.
///
/// GET /api/v1/admin/admins
pub async fn list(
    State(state): State<AppState>,
    _auth: AdminAuth,
) -> Result<Json<ApiResponse<Vec<Admin>>>, ApiError> {
    let repo = AdminRepository::new(state.pool.clone());
    let admins = repo.list().await?;
    Ok(Json(ApiResponse::ok("Daftar admin", admins)))
}

/// One staff account.
///
/// GET /api/v1/admin/admins/:id
pub async fn get(
    State(state): State<AppState>,
    _auth: AdminAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Admin>>, ApiError> {
    let repo = AdminRepository::new(state.pool.clone());
    let admin = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Admin tidak ditemukan".to_string()))?;
    Ok(Json(ApiResponse::ok("Detail admin", admin)))
}

/// Create a staff account.
///
/// POST /api/v1/admin/admins
pub async fn create(
    State(state): State<AppState>,
    _auth: AdminAuth,
    Json(request): Json<CreateAdminRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Admin>>), ApiError> {
    request.validate()?;

    let password_hash = hash_password(&request.password)
        .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))?;

    let repo = AdminRepository::new(state.pool.clone());
    let admin = repo.insert(&request, &password_hash).await?;

    tracing::info!(username = %admin.username, "Staff account created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Admin dibuat", admin)),
    ))
}

/// Update a staff account. Absent fields are left unchanged.
///
/// PUT /api/v1/admin/admins/:id
pub async fn update(
    State(state): State<AppState>,
    _auth: AdminAuth,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateAdminRequest>,
) -> Result<Json<ApiResponse<Admin>>, ApiError> {
    let repo = AdminRepository::new(state.pool.clone());
    let admin = repo
        .update(id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound("Admin tidak ditemukan".to_string()))?;

    Ok(Json(ApiResponse::ok("Admin diperbarui", admin)))
}

/// Delete a staff account. Deleting your own account is rejected.
///
/// DELETE /api/v1/admin/admins/:id
pub async fn delete(
    State(state): State<AppState>,
    auth: AdminAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    if id == auth.admin_id {
        return Err(ApiError::Validation(
            "Tidak dapat menghapus akun sendiri".to_string(),
        ));
    }

    let repo = AdminRepository::new(state.pool.clone());
    let deleted = repo.delete(id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Admin tidak ditemukan".to_string()));
    }

    Ok(Json(ApiResponse::message("Admin dihapus")))
}

/// Reset another staff member's password.
///
/// POST /api/v1/admin/admins/:id/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    _auth: AdminAuth,
    Path(id): Path<Uuid>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    request.validate()?;

    let password_hash = hash_password(&request.new_password)
        .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))?;

    let repo = AdminRepository::new(state.pool.clone());
    let updated = repo.update_password(id, &password_hash).await?;
    if updated == 0 {
        return Err(ApiError::NotFound("Admin tidak ditemukan".to_string()));
    }

    Ok(Json(ApiResponse::message("Password berhasil direset")))
}
