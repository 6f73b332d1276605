//! License type entity.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for license types.
///
/// `requirements` is a JSONB array of strings. Soft-deleted rows keep
/// their data so existing requests can still resolve the reference;
/// queries filter on `deleted_at IS NULL`.
#[derive(Debug, Clone, FromRow)]
pub struct LicenseTypeEntity {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub requirements: serde_json::Value,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
