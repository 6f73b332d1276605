//! Permit request domain models: the aggregate root and its wire types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::pagination::PageMeta;
use uuid::Uuid;
use validator::Validate;

/// Status of a permit request.
///
/// `approved` and `rejected` are final in intent, but no transition guard is
/// enforced: staff may move a request to any status at any time, and a
/// re-entry into `in_review` overwrites the processed timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    New,
    InReview,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::New => "new",
            RequestStatus::InReview => "in_review",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }

    /// Whether this status counts toward the "completed" dashboard bucket.
    pub fn is_completed(&self) -> bool {
        matches!(self, RequestStatus::Approved | RequestStatus::Rejected)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(RequestStatus::New),
            "in_review" => Ok(RequestStatus::InReview),
            "approved" => Ok(RequestStatus::Approved),
            "rejected" => Ok(RequestStatus::Rejected),
            other => Err(format!("unknown request status: {}", other)),
        }
    }
}

/// Final decision attached to a staff reply. Only the two terminal statuses
/// are representable, so a reply can never park a request in review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyDecision {
    Approved,
    Rejected,
}

impl ReplyDecision {
    pub fn status(&self) -> RequestStatus {
        match self {
            ReplyDecision::Approved => RequestStatus::Approved,
            ReplyDecision::Rejected => RequestStatus::Rejected,
        }
    }

    /// Indonesian status label used in the reply email subject and body.
    pub fn label(&self) -> &'static str {
        match self {
            ReplyDecision::Approved => "Disetujui",
            ReplyDecision::Rejected => "Ditolak",
        }
    }

    /// Accent color for the reply email body.
    pub fn accent_color(&self) -> &'static str {
        match self {
            ReplyDecision::Approved => "#10b981",
            ReplyDecision::Rejected => "#ef4444",
        }
    }
}

/// A citizen submitting a request. One row per submission, never merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Applicant {
    pub id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

/// Applicant fields captured from the public submission form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewApplicant {
    #[validate(custom(function = "shared::validation::validate_required_text"))]
    pub full_name: String,
    /// Recommended but not enforced at this layer.
    #[serde(default)]
    pub phone: String,
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = "shared::validation::validate_required_text"))]
    pub address: String,
}

/// An uploaded supporting file. Immutable after submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub id: Uuid,
    pub request_id: Uuid,
    /// System-generated, collision-resistant name on disk.
    pub stored_name: String,
    pub original_name: String,
    pub path: String,
    pub size_bytes: i64,
    pub mime_type: String,
    pub created_at: DateTime<Utc>,
}

/// Metadata for a file already staged in the upload directory.
#[derive(Debug, Clone)]
pub struct NewAttachment {
    pub stored_name: String,
    pub original_name: String,
    pub path: String,
    pub size_bytes: i64,
    pub mime_type: String,
}

/// The fully hydrated aggregate returned by reads.
#[derive(Debug, Clone, Serialize)]
pub struct PermitRequest {
    pub id: Uuid,
    pub applicant: Applicant,
    pub license_type: super::LicenseType,
    pub attachments: Vec<Attachment>,
    pub note: String,
    pub status: RequestStatus,
    pub submitted_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub reply_body: String,
    pub staff_note: String,
    pub handled_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a request from the public submission endpoint.
#[derive(Debug, Clone)]
pub struct SubmitRequestInput {
    pub applicant: NewApplicant,
    pub license_type_id: Uuid,
    pub note: String,
}

/// Body of `PATCH /admin/permohonan/:id/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: RequestStatus,
    #[serde(default)]
    pub staff_note: String,
}

/// Body of `POST /admin/permohonan/:id/balasan`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendReplyRequest {
    #[validate(custom(function = "shared::validation::validate_required_text"))]
    pub reply_body: String,
    pub status: ReplyDecision,
}

/// Query parameters for the admin request listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListRequestsQuery {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub per_page: Option<i64>,
    #[serde(default)]
    pub status: Option<RequestStatus>,
    #[serde(default)]
    pub search: Option<String>,
}

/// One page of hydrated requests plus pagination metadata.
#[derive(Debug, Clone, Serialize)]
pub struct RequestList {
    pub data: Vec<PermitRequest>,
    #[serde(flatten)]
    pub meta: PageMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&RequestStatus::InReview).unwrap(),
            "\"in_review\""
        );
        let parsed: RequestStatus = serde_json::from_str("\"approved\"").unwrap();
        assert_eq!(parsed, RequestStatus::Approved);
    }

    #[test]
    fn test_status_parse_and_display_roundtrip() {
        for status in [
            RequestStatus::New,
            RequestStatus::InReview,
            RequestStatus::Approved,
            RequestStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<RequestStatus>(), Ok(status));
        }
        assert!("pending".parse::<RequestStatus>().is_err());
    }

    #[test]
    fn test_completed_statuses() {
        assert!(RequestStatus::Approved.is_completed());
        assert!(RequestStatus::Rejected.is_completed());
        assert!(!RequestStatus::New.is_completed());
        assert!(!RequestStatus::InReview.is_completed());
    }

    #[test]
    fn test_reply_decision_labels_and_colors() {
        assert_eq!(ReplyDecision::Approved.label(), "Disetujui");
        assert_eq!(ReplyDecision::Rejected.label(), "Ditolak");
        assert_eq!(ReplyDecision::Approved.accent_color(), "#10b981");
        assert_eq!(ReplyDecision::Rejected.accent_color(), "#ef4444");
        assert_eq!(ReplyDecision::Approved.status(), RequestStatus::Approved);
        assert_eq!(ReplyDecision::Rejected.status(), RequestStatus::Rejected);
    }

    #[test]
    fn test_reply_decision_rejects_non_terminal_status() {
        // Wire format only accepts the two terminal decisions.
        assert!(serde_json::from_str::<ReplyDecision>("\"in_review\"").is_err());
        assert!(serde_json::from_str::<ReplyDecision>("\"new\"").is_err());
    }

    #[test]
    fn test_new_applicant_validation() {
        use validator::Validate;

        let valid = NewApplicant {
            full_name: "Siti Rahma".to_string(),
            phone: String::new(),
            email: "siti@example.com".to_string(),
            address: "Jl. Perintis Kemerdekaan 10".to_string(),
        };
        assert!(valid.validate().is_ok());

        let missing_name = NewApplicant {
            full_name: "  ".to_string(),
            ..valid.clone()
        };
        assert!(missing_name.validate().is_err());

        let bad_email = NewApplicant {
            email: "not-an-email".to_string(),
            ..valid
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_update_status_request_defaults_staff_note() {
        let req: UpdateStatusRequest = serde_json::from_str(r#"{"status": "in_review"}"#).unwrap();
        assert_eq!(req.status, RequestStatus::InReview);
        assert!(req.staff_note.is_empty());
    }
}
