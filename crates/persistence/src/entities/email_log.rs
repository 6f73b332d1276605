//! Email delivery log entity.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for the email delivery audit trail. Append-only:
/// rows are never updated or deleted.
#[derive(Debug, Clone, FromRow)]
pub struct EmailLogEntity {
    pub id: Uuid,
    pub request_id: Uuid,
    pub recipient: String,
    pub subject: String,
    pub body: String,

    /// Delivery status as stored (`pending`, `sent` or `failed`).
    pub status: String,

    pub error: Option<String>,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
