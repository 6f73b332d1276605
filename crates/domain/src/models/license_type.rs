//! License type (jenis perizinan) domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A category of permit with its own requirement checklist.
///
/// License types are soft-deleted: requests keep referencing them after
/// removal from the public form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenseType {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /admin/jenis-perizinan`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLicenseTypeRequest {
    #[validate(custom(function = "shared::validation::validate_required_text"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// Body of `PUT /admin/jenis-perizinan/:id`. Absent fields are left as-is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLicenseTypeRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

fn default_active() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_create_requires_non_empty_name() {
        let req = CreateLicenseTypeRequest {
            name: "  ".to_string(),
            description: String::new(),
            requirements: vec![],
            is_active: true,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_defaults() {
        let req: CreateLicenseTypeRequest =
            serde_json::from_str(r#"{"name": "Izin Penelitian"}"#).unwrap();
        assert!(req.is_active);
        assert!(req.requirements.is_empty());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_update_all_fields_optional() {
        let req: UpdateLicenseTypeRequest = serde_json::from_str("{}").unwrap();
        assert!(req.name.is_none());
        assert!(req.is_active.is_none());
    }
}
