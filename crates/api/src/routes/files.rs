//! Attachment download route.
//!
//! Downloads resolve the stored name through the database first, so a
//! path traversal attempt in the URL can never reach the filesystem.

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
};
use persistence::repositories::RequestRepository;
use serde::Deserialize;
use tokio_util::io::ReaderStream;

use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct DownloadParams {
    /// Overrides the download filename; defaults to the uploaded name.
    pub name: Option<String>,
}

/// Stream one attachment as a download.
///
/// GET /api/v1/download/:filename?name=laporan.pdf
pub async fn download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    Query(params): Query<DownloadParams>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = RequestRepository::new(state.pool.clone());
    let attachment = repo
        .find_attachment_by_stored_name(&filename)
        .await?
        .ok_or_else(|| ApiError::NotFound("Berkas tidak ditemukan".to_string()))?;

    let file = tokio::fs::File::open(&attachment.path).await.map_err(|e| {
        tracing::error!(path = %attachment.path, "Attachment missing on disk: {}", e);
        ApiError::NotFound("Berkas tidak ditemukan".to_string())
    })?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(&attachment.mime_type)
            .unwrap_or(HeaderValue::from_static("application/octet-stream")),
    );
    let download_name = params
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or(attachment.original_name);
    let disposition = format!("attachment; filename=\"{}\"", download_name.replace('"', ""));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .unwrap_or(HeaderValue::from_static("attachment")),
    );

    let stream = ReaderStream::new(file);
    Ok((headers, Body::from_stream(stream)))
}
