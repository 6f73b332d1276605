//! Applicant entity.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for applicants. One row per submission.
#[derive(Debug, Clone, FromRow)]
pub struct ApplicantEntity {
    pub id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}
