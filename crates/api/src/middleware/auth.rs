//! Staff JWT authentication middleware.
//!
//! `require_auth` validates the Bearer token and stores the staff
//! identity in request extensions. `require_super_admin` additionally
//! checks the role claim. The claims are the only identity source: a
//! token that omits any claim, carries an unknown role or fails
//! signature or expiry checks is rejected before any handler runs.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::jwt::AdminRole;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminAuth;

/// Middleware that requires a valid staff JWT.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let auth = match authenticate(&state, &req) {
        Ok(auth) => auth,
        Err(err) => return err.into_response(),
    };

    req.extensions_mut().insert(auth);
    next.run(req).await
}

/// Middleware that requires a valid staff JWT with the super admin role.
pub async fn require_super_admin(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let auth = match authenticate(&state, &req) {
        Ok(auth) => auth,
        Err(err) => return err.into_response(),
    };

    if auth.role != AdminRole::SuperAdmin {
        return ApiError::Forbidden("Super admin access required".to_string()).into_response();
    }

    req.extensions_mut().insert(auth);
    next.run(req).await
}

fn authenticate(state: &AppState, req: &Request<Body>) -> Result<AdminAuth, ApiError> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            return Err(ApiError::Unauthorized(
                "Missing or invalid Authorization header".to_string(),
            ));
        }
    };

    AdminAuth::from_token(&state.jwt, token).map_err(|e| {
        tracing::debug!("JWT validation failed: {}", e);
        ApiError::Unauthorized("Invalid or expired token".to_string())
    })
}
