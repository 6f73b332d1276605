use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error body in the response envelope shape.
#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg.clone()),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".into(),
                )
            }
        };

        let body = ErrorBody {
            success: false,
            message,
            error: error_code.into(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".into()),
            sqlx::Error::Database(db_err) => {
                if let Some(code) = db_err.code() {
                    match code.as_ref() {
                        "23505" => ApiError::Conflict("Resource already exists".into()),
                        "23503" => ApiError::NotFound("Referenced resource not found".into()),
                        _ => ApiError::Internal(format!("Database error: {}", db_err)),
                    }
                } else {
                    ApiError::Internal(format!("Database error: {}", db_err))
                }
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<crate::services::requests::RequestServiceError> for ApiError {
    fn from(err: crate::services::requests::RequestServiceError) -> Self {
        use crate::services::requests::RequestServiceError;
        match err {
            RequestServiceError::NotFound(msg) => ApiError::NotFound(msg),
            RequestServiceError::Validation(msg) => ApiError::Validation(msg),
            RequestServiceError::Database(e) => ApiError::from(e),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    let detail = e
                        .message
                        .clone()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    format!("{}: {}", field, detail)
                })
            })
            .collect();

        ApiError::Validation(messages.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_status_codes() {
        let cases = [
            (
                ApiError::Unauthorized("no token".into()),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ApiError::Forbidden("staff only".into()),
                StatusCode::FORBIDDEN,
            ),
            (
                ApiError::NotFound("request not found".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::Conflict("username taken".into()),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::Validation("name is required".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_row_not_found_maps_to_404() {
        let error = ApiError::from(sqlx::Error::RowNotFound);
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_missing_license_type_surfaces_as_404() {
        use crate::services::requests::RequestServiceError;

        // Submissions against an unknown license type are a lookup
        // failure, not a malformed request.
        let error = ApiError::from(RequestServiceError::NotFound(
            "Jenis perizinan tidak ditemukan".to_string(),
        ));
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_errors_join_messages() {
        use validator::Validate;

        #[derive(Validate)]
        struct Form {
            #[validate(email)]
            email: String,
        }

        let form = Form {
            email: "nope".to_string(),
        };
        let error = ApiError::from(form.validate().unwrap_err());
        match error {
            ApiError::Validation(msg) => assert!(msg.contains("email")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
