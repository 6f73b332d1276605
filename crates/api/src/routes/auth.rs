//! Staff authentication routes: login, profile and password change.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use domain::models::{Admin, AdminInfo, ChangePasswordRequest, LoginRequest, LoginResponse};
use persistence::repositories::{admin_entity_to_domain, AdminRepository};
use shared::password::{hash_password, verify_password};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminAuth;
use crate::response::ApiResponse;

/// Authenticate a staff member and issue a token.
///
/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    request.validate()?;

    let repo = AdminRepository::new(state.pool.clone());
    let entity = repo
        .find_by_username(&request.username)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Username atau password salah".to_string()))?;

    if !entity.is_active {
        return Err(ApiError::Unauthorized("Akun dinonaktifkan".to_string()));
    }

    let valid = verify_password(&request.password, &entity.password_hash)
        .map_err(|e| ApiError::Internal(format!("Password verification failed: {}", e)))?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Username atau password salah".to_string(),
        ));
    }

    let admin = admin_entity_to_domain(&entity);
    let (token, exp) = state
        .jwt
        .generate_token(admin.id, &admin.username, admin.role)
        .map_err(|e| ApiError::Internal(format!("Token generation failed: {}", e)))?;

    let expires_at = DateTime::<Utc>::from_timestamp(exp, 0)
        .ok_or_else(|| ApiError::Internal("Invalid token expiry".to_string()))?;

    tracing::info!(username = %admin.username, "Staff login");

    Ok(Json(ApiResponse::ok(
        "Login berhasil",
        LoginResponse {
            token,
            expires_at,
            admin: AdminInfo::from(&admin),
        },
    )))
}

/// Profile of the authenticated staff member.
///
/// GET /api/v1/auth/profile
pub async fn profile(
    State(state): State<AppState>,
    auth: AdminAuth,
) -> Result<Json<ApiResponse<Admin>>, ApiError> {
    let repo = AdminRepository::new(state.pool.clone());
    let admin = repo
        .find_by_id(auth.admin_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Akun tidak ditemukan".to_string()))?;

    Ok(Json(ApiResponse::ok("Profil", admin)))
}

/// Change the authenticated staff member's own password.
///
/// POST /api/v1/auth/change-password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AdminAuth,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    request.validate()?;

    let repo = AdminRepository::new(state.pool.clone());
    let entity = repo
        .find_by_username(&auth.username)
        .await?
        .ok_or_else(|| ApiError::NotFound("Akun tidak ditemukan".to_string()))?;

    let valid = verify_password(&request.old_password, &entity.password_hash)
        .map_err(|e| ApiError::Internal(format!("Password verification failed: {}", e)))?;
    if !valid {
        return Err(ApiError::Validation("Password lama salah".to_string()));
    }

    let new_hash = hash_password(&request.new_password)
        .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))?;
    repo.update_password(entity.id, &new_hash).await?;

    Ok(Json(ApiResponse::message("Password berhasil diubah")))
}
