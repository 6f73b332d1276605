//! JWT token utilities for admin authentication.
//!
//! Tokens are signed with HS256 using a shared secret from configuration.
//! Claims are strongly typed: a token with a missing or malformed field
//! fails validation instead of being accepted with defaults.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error type for JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingError(String),

    #[error("Failed to decode token: {0}")]
    DecodingError(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,
}

/// Admin role carried in the token and stored on the admin record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    SuperAdmin,
    Admin,
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdminRole::SuperAdmin => write!(f, "super_admin"),
            AdminRole::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(AdminRole::SuperAdmin),
            "admin" => Ok(AdminRole::Admin),
            other => Err(format!("unknown admin role: {}", other)),
        }
    }
}

/// JWT token claims.
///
/// Every field is required; deserialization rejects tokens that omit any of
/// them, so downstream code never sees a partially-populated identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (admin ID)
    pub sub: String,
    /// Admin username at issue time
    pub username: String,
    /// Admin role at issue time
    pub role: AdminRole,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Default leeway in seconds for clock skew tolerance
pub const DEFAULT_LEEWAY_SECS: u64 = 30;

/// Configuration for JWT token generation and validation.
#[derive(Clone)]
pub struct JwtConfig {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    /// Token expiration in seconds
    pub token_expiry_secs: i64,
    /// Leeway in seconds for clock skew tolerance
    pub leeway_secs: u64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("token_expiry_secs", &self.token_expiry_secs)
            .field("leeway_secs", &self.leeway_secs)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

impl JwtConfig {
    /// Creates a new JwtConfig from a shared HMAC secret.
    pub fn new(secret: &str, token_expiry_secs: i64) -> Self {
        Self::with_leeway(secret, token_expiry_secs, DEFAULT_LEEWAY_SECS)
    }

    /// Creates a new JwtConfig with a custom leeway.
    pub fn with_leeway(secret: &str, token_expiry_secs: i64, leeway_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_expiry_secs,
            leeway_secs,
        }
    }

    /// Generates a token for the given admin identity.
    ///
    /// Returns the encoded token and its expiry timestamp.
    pub fn generate_token(
        &self,
        admin_id: Uuid,
        username: &str,
        role: AdminRole,
    ) -> Result<(String, i64), JwtError> {
        let now = Utc::now();
        let exp = (now + Duration::seconds(self.token_expiry_secs)).timestamp();

        let claims = Claims {
            sub: admin_id.to_string(),
            username: username.to_string(),
            role,
            exp,
            iat: now.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))?;

        Ok((token, exp))
    }

    /// Validates a token and returns its claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = self.leeway_secs;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature => JwtError::InvalidToken,
                _ => JwtError::DecodingError(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }
}

/// Extracts the admin ID from validated claims.
pub fn extract_admin_id(claims: &Claims) -> Result<Uuid, JwtError> {
    Uuid::parse_str(&claims.sub).map_err(|_| JwtError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration as StdDuration;

    fn create_test_config() -> JwtConfig {
        JwtConfig::with_leeway("test_secret_key_for_jwt_testing_12345", 3600, 0)
    }

    #[test]
    fn test_generate_token() {
        let config = create_test_config();
        let admin_id = Uuid::new_v4();

        let (token, exp) = config
            .generate_token(admin_id, "petugas", AdminRole::Admin)
            .unwrap();

        assert!(!token.is_empty());
        assert!(token.contains('.'), "JWT should have dots separating parts");
        assert!(exp > Utc::now().timestamp());
    }

    #[test]
    fn test_validate_token_roundtrip() {
        let config = create_test_config();
        let admin_id = Uuid::new_v4();

        let (token, _) = config
            .generate_token(admin_id, "kepala-dinas", AdminRole::SuperAdmin)
            .unwrap();
        let claims = config.validate_token(&token).unwrap();

        assert_eq!(claims.sub, admin_id.to_string());
        assert_eq!(claims.username, "kepala-dinas");
        assert_eq!(claims.role, AdminRole::SuperAdmin);
    }

    #[test]
    fn test_expired_token() {
        let config = JwtConfig::with_leeway("secret", 1, 0);
        let admin_id = Uuid::new_v4();

        let (token, _) = config
            .generate_token(admin_id, "petugas", AdminRole::Admin)
            .unwrap();

        sleep(StdDuration::from_secs(2));

        let result = config.validate_token(&token);
        assert!(
            matches!(result, Err(JwtError::TokenExpired)),
            "Expected TokenExpired, got: {:?}",
            result
        );
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let config = create_test_config();
        let other = JwtConfig::with_leeway("a_completely_different_secret", 3600, 0);
        let admin_id = Uuid::new_v4();

        let (token, _) = config
            .generate_token(admin_id, "petugas", AdminRole::Admin)
            .unwrap();

        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_malformed_token() {
        let config = create_test_config();
        assert!(config.validate_token("not_a_jwt").is_err());
        assert!(config.validate_token("invalid.token.here").is_err());
    }

    #[test]
    fn test_token_missing_claims_rejected() {
        // Token signed with the right secret but with a claims payload that
        // lacks the username and role fields must fail closed.
        #[derive(Serialize)]
        struct Partial {
            sub: String,
            exp: i64,
        }

        let config = create_test_config();
        let partial = Partial {
            sub: Uuid::new_v4().to_string(),
            exp: (Utc::now() + Duration::seconds(60)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &partial,
            &EncodingKey::from_secret(b"test_secret_key_for_jwt_testing_12345"),
        )
        .unwrap();

        assert!(config.validate_token(&token).is_err());
    }

    #[test]
    fn test_token_unknown_role_rejected() {
        #[derive(Serialize)]
        struct BadRole {
            sub: String,
            username: String,
            role: String,
            exp: i64,
            iat: i64,
        }

        let config = create_test_config();
        let now = Utc::now();
        let bad = BadRole {
            sub: Uuid::new_v4().to_string(),
            username: "petugas".to_string(),
            role: "root".to_string(),
            exp: (now + Duration::seconds(60)).timestamp(),
            iat: now.timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &bad,
            &EncodingKey::from_secret(b"test_secret_key_for_jwt_testing_12345"),
        )
        .unwrap();

        assert!(config.validate_token(&token).is_err());
    }

    #[test]
    fn test_extract_admin_id() {
        let config = create_test_config();
        let admin_id = Uuid::new_v4();

        let (token, _) = config
            .generate_token(admin_id, "petugas", AdminRole::Admin)
            .unwrap();
        let claims = config.validate_token(&token).unwrap();

        assert_eq!(extract_admin_id(&claims).unwrap(), admin_id);
    }

    #[test]
    fn test_admin_role_parse_and_display() {
        assert_eq!(AdminRole::SuperAdmin.to_string(), "super_admin");
        assert_eq!(AdminRole::Admin.to_string(), "admin");
        assert_eq!("super_admin".parse::<AdminRole>(), Ok(AdminRole::SuperAdmin));
        assert!("root".parse::<AdminRole>().is_err());
    }

    #[test]
    fn test_claims_timestamps() {
        let config = create_test_config();
        let admin_id = Uuid::new_v4();

        let before = Utc::now().timestamp();
        let (token, _) = config
            .generate_token(admin_id, "petugas", AdminRole::Admin)
            .unwrap();
        let after = Utc::now().timestamp();

        let claims = config.validate_token(&token).unwrap();

        assert!(claims.iat >= before && claims.iat <= after);
        assert_eq!(claims.exp - claims.iat, config.token_expiry_secs);
    }
}
