//! Admin account entity.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for staff accounts.
///
/// Carries the password hash, which no domain model exposes. Only the
/// auth flow reads it, through [`crate::repositories::AdminRepository`].
#[derive(Debug, Clone, FromRow)]
pub struct AdminEntity {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub full_name: String,

    /// Role as stored (`super_admin` or `admin`).
    pub role: String,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
