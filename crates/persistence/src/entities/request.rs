//! Permit request entity.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Flattened join row for a permit request with its applicant and
/// license type. Attachments are fetched separately and merged in by
/// the repository, which keeps the list query to one join per page.
#[derive(Debug, Clone, FromRow)]
pub struct RequestRowEntity {
    pub id: Uuid,
    pub note: String,

    /// Status as stored (`new`, `in_review`, `approved`, `rejected`).
    pub status: String,

    pub submitted_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub reply_body: String,
    pub staff_note: String,
    pub handled_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,

    // Applicant columns, aliased in the select list.
    pub applicant_id: Uuid,
    pub applicant_full_name: String,
    pub applicant_phone: String,
    pub applicant_email: String,
    pub applicant_address: String,
    pub applicant_created_at: DateTime<Utc>,

    // License type columns, aliased in the select list.
    pub license_type_id: Uuid,
    pub license_name: String,
    pub license_description: String,
    pub license_requirements: serde_json::Value,
    pub license_is_active: bool,
    pub license_created_at: DateTime<Utc>,
    pub license_updated_at: DateTime<Utc>,
}
