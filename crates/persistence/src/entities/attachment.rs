//! Attachment entity.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database entity for uploaded supporting files. Immutable after insert.
#[derive(Debug, Clone, FromRow)]
pub struct AttachmentEntity {
    pub id: Uuid,
    pub request_id: Uuid,

    /// Collision-resistant name on disk.
    pub stored_name: String,

    /// Name the applicant uploaded the file under.
    pub original_name: String,

    pub path: String,
    pub size_bytes: i64,
    pub mime_type: String,
    pub created_at: DateTime<Utc>,
}
