//! In-app notification domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An in-app alert for a staff member about request activity. Never deleted;
/// only the read flag changes after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub admin_id: Uuid,
    pub request_id: Uuid,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Message composed when a new request arrives.
pub fn new_request_message(applicant_name: &str, license_type_name: &str) -> String {
    format!(
        "Permohonan baru dari {} - {}",
        applicant_name, license_type_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request_message_format() {
        assert_eq!(
            new_request_message("Budi Santoso", "Izin Penelitian"),
            "Permohonan baru dari Budi Santoso - Izin Penelitian"
        );
    }
}
