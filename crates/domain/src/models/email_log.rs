//! Email delivery audit trail models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Delivery status of one dispatch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailDeliveryStatus {
    Pending,
    Sent,
    Failed,
}

impl std::fmt::Display for EmailDeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmailDeliveryStatus::Pending => write!(f, "pending"),
            EmailDeliveryStatus::Sent => write!(f, "sent"),
            EmailDeliveryStatus::Failed => write!(f, "failed"),
        }
    }
}

impl std::str::FromStr for EmailDeliveryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(EmailDeliveryStatus::Pending),
            "sent" => Ok(EmailDeliveryStatus::Sent),
            "failed" => Ok(EmailDeliveryStatus::Failed),
            other => Err(format!("unknown delivery status: {}", other)),
        }
    }
}

/// One row per dispatch attempt. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailLog {
    pub id: Uuid,
    pub request_id: Uuid,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub status: EmailDeliveryStatus,
    pub error: Option<String>,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Input for appending a delivery record.
#[derive(Debug, Clone)]
pub struct NewEmailLog {
    pub request_id: Uuid,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub status: EmailDeliveryStatus,
    pub error: Option<String>,
    pub sent_at: Option<DateTime<Utc>>,
}

impl NewEmailLog {
    /// Record for a successful transport handoff.
    pub fn sent(request_id: Uuid, recipient: String, subject: String, body: String) -> Self {
        Self {
            request_id,
            recipient,
            subject,
            body,
            status: EmailDeliveryStatus::Sent,
            error: None,
            sent_at: Some(Utc::now()),
        }
    }

    /// Record for a failed transport handoff.
    pub fn failed(
        request_id: Uuid,
        recipient: String,
        subject: String,
        body: String,
        error: String,
    ) -> Self {
        Self {
            request_id,
            recipient,
            subject,
            body,
            status: EmailDeliveryStatus::Failed,
            error: Some(error),
            sent_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_status_roundtrip() {
        for status in [
            EmailDeliveryStatus::Pending,
            EmailDeliveryStatus::Sent,
            EmailDeliveryStatus::Failed,
        ] {
            assert_eq!(
                status.to_string().parse::<EmailDeliveryStatus>(),
                Ok(status)
            );
        }
        assert!("bounced".parse::<EmailDeliveryStatus>().is_err());
    }

    #[test]
    fn test_sent_record_has_timestamp_no_error() {
        let log = NewEmailLog::sent(
            Uuid::new_v4(),
            "a@b.com".to_string(),
            "Subjek".to_string(),
            "Isi".to_string(),
        );
        assert_eq!(log.status, EmailDeliveryStatus::Sent);
        assert!(log.sent_at.is_some());
        assert!(log.error.is_none());
    }

    #[test]
    fn test_failed_record_has_error_no_timestamp() {
        let log = NewEmailLog::failed(
            Uuid::new_v4(),
            "a@b.com".to_string(),
            "Subjek".to_string(),
            "Isi".to_string(),
            "connection refused".to_string(),
        );
        assert_eq!(log.status, EmailDeliveryStatus::Failed);
        assert!(log.sent_at.is_none());
        assert_eq!(log.error.as_deref(), Some("connection refused"));
    }
}
