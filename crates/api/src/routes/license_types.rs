//! License type routes: public catalog plus super admin management.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::{CreateLicenseTypeRequest, LicenseType, UpdateLicenseTypeRequest};
use persistence::repositories::LicenseTypeRepository;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::response::ApiResponse;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub aktif_only: bool,
}

/// License type catalog for the public submission form.
///
/// GET /api/v1/jenis-perizinan?aktif_only=true
pub async fn list_public(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<Vec<LicenseType>>>, ApiError> {
    let repo = LicenseTypeRepository::new(state.pool.clone());
    let types = repo.list(params.aktif_only).await?;
    Ok(Json(ApiResponse::ok("Daftar jenis perizinan", types)))
}

/// All license types including inactive ones, for staff.
///
/// GET /api/v1/admin/jenis-perizinan
pub async fn list_all(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<LicenseType>>>, ApiError> {
    let repo = LicenseTypeRepository::new(state.pool.clone());
    let types = repo.list(false).await?;
    Ok(Json(ApiResponse::ok("Daftar jenis perizinan", types)))
}

/// One license type, served on both the public and the admin path.
///
/// GET /api/v1/jenis-perizinan/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<LicenseType>>, ApiError> {
    let repo = LicenseTypeRepository::new(state.pool.clone());
    let license_type = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Jenis perizinan tidak ditemukan".to_string()))?;
    Ok(Json(ApiResponse::ok("Jenis perizinan", license_type)))
}

/// Create a license type.
///
/// POST /api/v1/admin/jenis-perizinan
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateLicenseTypeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LicenseType>>), ApiError> {
    request.validate()?;

    let repo = LicenseTypeRepository::new(state.pool.clone());
    let license_type = repo.insert(&request).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Jenis perizinan dibuat", license_type)),
    ))
}

/// Update a license type. Absent fields are left unchanged.
///
/// PUT /api/v1/admin/jenis-perizinan/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateLicenseTypeRequest>,
) -> Result<Json<ApiResponse<LicenseType>>, ApiError> {
    if let Some(name) = &request.name {
        if name.trim().is_empty() {
            return Err(ApiError::Validation("Nama tidak boleh kosong".to_string()));
        }
    }

    let repo = LicenseTypeRepository::new(state.pool.clone());
    let license_type = repo
        .update(id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound("Jenis perizinan tidak ditemukan".to_string()))?;

    Ok(Json(ApiResponse::ok("Jenis perizinan diperbarui", license_type)))
}

/// Soft-delete a license type. Existing requests keep their reference.
///
/// DELETE /api/v1/admin/jenis-perizinan/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let repo = LicenseTypeRepository::new(state.pool.clone());
    let deleted = repo.soft_delete(id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound(
            "Jenis perizinan tidak ditemukan".to_string(),
        ));
    }

    Ok(Json(ApiResponse::message("Jenis perizinan dihapus")))
}
