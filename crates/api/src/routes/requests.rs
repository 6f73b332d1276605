//! Permit request routes: public submission plus staff review.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::{
    EmailLog, ListRequestsQuery, NewApplicant, PermitRequest, RequestList, RequestStatus,
    SendReplyRequest, SubmitRequestInput, UpdateStatusRequest,
};
use persistence::repositories::EmailLogRepository;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminAuth;
use crate::response::ApiResponse;
use crate::services::storage;

/// One file pulled out of the submission form.
struct UploadedFile {
    original_name: String,
    mime_type: String,
    data: Vec<u8>,
}

/// Accept a public permit request submission.
///
/// POST /api/v1/permohonan (multipart/form-data)
///
/// Text fields use the Indonesian form names (`nama_lengkap`,
/// `nomor_telepon`, `email`, `alamat`, `jenis_perizinan_id`, `catatan`);
/// supporting files arrive under `berkas`, repeatable.
pub async fn create(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<PermitRequest>>), ApiError> {
    let mut full_name = String::new();
    let mut phone = String::new();
    let mut email = String::new();
    let mut address = String::new();
    let mut license_type_id: Option<Uuid> = None;
    let mut note = String::new();
    let mut files: Vec<UploadedFile> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "nama_lengkap" => full_name = read_text(field, &name).await?,
            "nomor_telepon" => phone = read_text(field, &name).await?,
            "email" => email = read_text(field, &name).await?,
            "alamat" => address = read_text(field, &name).await?,
            "catatan" => note = read_text(field, &name).await?,
            "jenis_perizinan_id" => {
                let raw = read_text(field, &name).await?;
                let id = raw.trim().parse::<Uuid>().map_err(|_| {
                    ApiError::Validation("jenis_perizinan_id tidak valid".to_string())
                })?;
                license_type_id = Some(id);
            }
            "berkas" => {
                let original_name = field.file_name().unwrap_or("berkas").to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::Validation(format!("Failed to read berkas: {}", e)))?;
                files.push(UploadedFile {
                    original_name,
                    mime_type,
                    data: data.to_vec(),
                });
            }
            // Unknown fields are ignored so the form can evolve.
            _ => {}
        }
    }

    let applicant = NewApplicant {
        full_name,
        phone,
        email,
        address,
    };
    applicant.validate()?;

    let license_type_id = license_type_id
        .ok_or_else(|| ApiError::Validation("jenis_perizinan_id wajib diisi".to_string()))?;

    let mut staged = Vec::with_capacity(files.len());
    for file in &files {
        let attachment = storage::save_upload(
            &state.config.uploads.dir,
            &file.original_name,
            &file.mime_type,
            &file.data,
        )
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to store upload: {}", e)))?;
        staged.push(attachment);
    }

    let request = state
        .request_service()
        .create(
            SubmitRequestInput {
                applicant,
                license_type_id,
                note,
            },
            staged,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Permohonan berhasil diajukan", request)),
    ))
}

async fn read_text(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::Validation(format!("Failed to read {}: {}", name, e)))
}

/// Paginated request listing with optional status filter and search.
///
/// GET /api/v1/admin/permohonan
pub async fn list(
    State(state): State<AppState>,
    _auth: AdminAuth,
    Query(query): Query<ListRequestsQuery>,
) -> Result<Json<ApiResponse<RequestList>>, ApiError> {
    let list = state.request_service().list(&query).await?;
    Ok(Json(ApiResponse::ok("Daftar permohonan", list)))
}

/// One request with everything hydrated.
///
/// GET /api/v1/admin/permohonan/:id
pub async fn get(
    State(state): State<AppState>,
    _auth: AdminAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<PermitRequest>>, ApiError> {
    let request = state.request_service().get(id).await?;
    Ok(Json(ApiResponse::ok("Detail permohonan", request)))
}

/// All requests in one status.
///
/// GET /api/v1/admin/permohonan/status/:status
pub async fn list_by_status(
    State(state): State<AppState>,
    _auth: AdminAuth,
    Path(status): Path<String>,
) -> Result<Json<ApiResponse<Vec<PermitRequest>>>, ApiError> {
    let status = status
        .parse::<RequestStatus>()
        .map_err(|e| ApiError::Validation(e))?;

    let requests = state.request_service().list_by_status(status).await?;
    Ok(Json(ApiResponse::ok("Daftar permohonan", requests)))
}

/// Delivery audit trail for one request's reply emails.
///
/// GET /api/v1/admin/permohonan/:id/email-logs
pub async fn email_logs(
    State(state): State<AppState>,
    _auth: AdminAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<EmailLog>>>, ApiError> {
    // 404 for unknown requests, empty list for known ones without mail.
    state.request_service().get(id).await?;

    let repo = EmailLogRepository::new(state.pool.clone());
    let logs = repo.list_for_request(id).await?;
    Ok(Json(ApiResponse::ok("Riwayat email", logs)))
}

/// Move a request to a new status.
///
/// PATCH /api/v1/admin/permohonan/:id/status
pub async fn update_status(
    State(state): State<AppState>,
    auth: AdminAuth,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<PermitRequest>>, ApiError> {
    let updated = state
        .request_service()
        .update_status(id, &request, auth.admin_id)
        .await?;

    Ok(Json(ApiResponse::ok("Status permohonan diperbarui", updated)))
}

/// Record a staff decision and dispatch the reply email.
///
/// POST /api/v1/admin/permohonan/:id/balasan
pub async fn send_reply(
    State(state): State<AppState>,
    auth: AdminAuth,
    Path(id): Path<Uuid>,
    Json(request): Json<SendReplyRequest>,
) -> Result<Json<ApiResponse<PermitRequest>>, ApiError> {
    request.validate()?;

    let updated = state
        .request_service()
        .send_reply(id, &request, auth.admin_id)
        .await?;

    Ok(Json(ApiResponse::ok("Balasan terkirim", updated)))
}
