//! Admin account domain models and auth wire types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::jwt::AdminRole;
use uuid::Uuid;
use validator::Validate;

/// A staff account. The password hash never leaves the persistence layer.
#[derive(Debug, Clone, Serialize)]
pub struct Admin {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: AdminRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin profile embedded in auth responses.
#[derive(Debug, Clone, Serialize)]
pub struct AdminInfo {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: AdminRole,
}

impl From<&Admin> for AdminInfo {
    fn from(admin: &Admin) -> Self {
        Self {
            id: admin.id,
            username: admin.username.clone(),
            email: admin.email.clone(),
            full_name: admin.full_name.clone(),
            role: admin.role,
        }
    }
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(custom(function = "shared::validation::validate_required_text"))]
    pub username: String,
    #[validate(custom(function = "shared::validation::validate_required_text"))]
    pub password: String,
}

/// Response of `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub admin: AdminInfo,
}

/// Body of `POST /admin/admins`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAdminRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(length(min = 6))]
    pub password: String,
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = "shared::validation::validate_required_text"))]
    pub full_name: String,
    pub role: AdminRole,
}

/// Body of `PUT /admin/admins/:id`. Absent fields are left as-is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAdminRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<AdminRole>,
    pub is_active: Option<bool>,
}

/// Body of `POST /auth/change-password`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(custom(function = "shared::validation::validate_required_text"))]
    pub old_password: String,
    #[validate(length(min = 6))]
    pub new_password: String,
}

/// Body of `POST /admin/admins/:id/reset-password`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 6))]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_create_admin_validation() {
        let valid = CreateAdminRequest {
            username: "petugas1".to_string(),
            password: "rahasia123".to_string(),
            email: "petugas@dinkes.go.id".to_string(),
            full_name: "Petugas Satu".to_string(),
            role: AdminRole::Admin,
        };
        assert!(valid.validate().is_ok());

        let short_password = CreateAdminRequest {
            password: "abc".to_string(),
            ..valid.clone()
        };
        assert!(short_password.validate().is_err());

        let short_username = CreateAdminRequest {
            username: "ab".to_string(),
            ..valid
        };
        assert!(short_username.validate().is_err());
    }

    #[test]
    fn test_admin_info_from_admin() {
        let now = Utc::now();
        let admin = Admin {
            id: Uuid::new_v4(),
            username: "kadis".to_string(),
            email: "kadis@dinkes.go.id".to_string(),
            full_name: "Kepala Dinas".to_string(),
            role: AdminRole::SuperAdmin,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let info = AdminInfo::from(&admin);
        assert_eq!(info.id, admin.id);
        assert_eq!(info.role, AdminRole::SuperAdmin);
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("super_admin"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn test_role_wire_format() {
        let role: AdminRole = serde_json::from_str("\"super_admin\"").unwrap();
        assert_eq!(role, AdminRole::SuperAdmin);
        assert!(serde_json::from_str::<AdminRole>("\"root\"").is_err());
    }
}
