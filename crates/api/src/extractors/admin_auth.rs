//! Authenticated staff identity, extracted from the JWT claims.

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::jwt::{extract_admin_id, AdminRole, JwtConfig};
use uuid::Uuid;

use crate::error::ApiError;

/// Identity of the staff member making the request. Inserted into
/// request extensions by the auth middleware.
#[derive(Debug, Clone)]
pub struct AdminAuth {
    pub admin_id: Uuid,
    pub username: String,
    pub role: AdminRole,
}

impl AdminAuth {
    /// Validates a token and builds the identity from its claims.
    pub fn from_token(jwt: &JwtConfig, token: &str) -> Result<Self, String> {
        let claims = jwt
            .validate_token(token)
            .map_err(|e| format!("Invalid token: {}", e))?;

        let admin_id =
            extract_admin_id(&claims).map_err(|_| "Invalid admin ID in token".to_string())?;

        Ok(AdminAuth {
            admin_id,
            username: claims.username,
            role: claims.role,
        })
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AdminAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AdminAuth>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_token_roundtrip() {
        let jwt = JwtConfig::new("test-secret", 3600);
        let admin_id = Uuid::new_v4();
        let (token, _) = jwt
            .generate_token(admin_id, "petugas1", AdminRole::SuperAdmin)
            .unwrap();

        let auth = AdminAuth::from_token(&jwt, &token).unwrap();
        assert_eq!(auth.admin_id, admin_id);
        assert_eq!(auth.username, "petugas1");
        assert_eq!(auth.role, AdminRole::SuperAdmin);
    }

    #[test]
    fn test_from_token_rejects_garbage() {
        let jwt = JwtConfig::new("test-secret", 3600);
        assert!(AdminAuth::from_token(&jwt, "not-a-token").is_err());
    }
}
