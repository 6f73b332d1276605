//! Reply email composition and dispatch.
//!
//! Two transports are available:
//! - `console`: logs the message instead of sending (development)
//! - `relay`: posts the message to an HTTP mail relay
//!
//! Dispatch is decoupled from the reply request: the handler spawns it
//! and responds immediately. Every dispatch appends exactly one row to
//! the email log, `sent` or `failed`, and a transport failure is never
//! surfaced to the caller.

use std::sync::Arc;

use domain::models::{NewEmailLog, PermitRequest, ReplyDecision};
use domain::services::mail::{MailError, MailTransport, OutgoingEmail};
use persistence::repositories::EmailLogRepository;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::config::EmailConfig;

/// Builds the configured transport. Unknown providers and disabled
/// email both fall back to the console transport.
pub fn build_transport(config: &EmailConfig) -> Arc<dyn MailTransport> {
    if config.enabled && config.provider == "relay" {
        Arc::new(RelayTransport::new(config))
    } else {
        if config.enabled && config.provider != "console" {
            warn!(provider = %config.provider, "Unknown email provider, using console");
        }
        Arc::new(ConsoleTransport)
    }
}

/// Transport that logs messages instead of sending them.
pub struct ConsoleTransport;

#[async_trait::async_trait]
impl MailTransport for ConsoleTransport {
    async fn send(&self, message: &OutgoingEmail) -> Result<(), MailError> {
        info!(
            to = %message.to,
            to_name = ?message.to_name,
            subject = %message.subject,
            body_length = message.body_html.len(),
            "Email (console provider)"
        );
        Ok(())
    }
}

/// Transport that posts messages to an HTTP mail relay.
pub struct RelayTransport {
    client: reqwest::Client,
    url: String,
    api_key: String,
    sender_email: String,
    sender_name: String,
}

impl RelayTransport {
    pub fn new(config: &EmailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: config.relay_url.clone(),
            api_key: config.relay_api_key.clone(),
            sender_email: config.sender_email.clone(),
            sender_name: config.sender_name.clone(),
        }
    }
}

#[async_trait::async_trait]
impl MailTransport for RelayTransport {
    async fn send(&self, message: &OutgoingEmail) -> Result<(), MailError> {
        if self.url.is_empty() {
            return Err(MailError::NotConfigured);
        }

        let body = serde_json::json!({
            "from": {
                "email": self.sender_email,
                "name": self.sender_name,
            },
            "to": [{
                "email": message.to,
                "name": message.to_name,
            }],
            "subject": message.subject,
            "html": message.body_html,
        });

        let response = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| MailError::SendFailed(format!("Relay request failed: {}", e)))?;

        if response.status().is_success() {
            info!(to = %message.to, subject = %message.subject, "Email sent via relay");
            Ok(())
        } else {
            Err(MailError::ProviderError(format!(
                "Relay returned status {}",
                response.status()
            )))
        }
    }
}

/// Composes the reply email for a decided request.
pub fn render_reply_email(
    request: &PermitRequest,
    decision: ReplyDecision,
    reply_body: &str,
) -> OutgoingEmail {
    let subject = format!(
        "Balasan Permohonan {} - {}",
        request.license_type.name,
        decision.label()
    );

    let body_html = format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"></head>
<body style="font-family: Arial, Helvetica, sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto; padding: 20px;">
    <div style="background: {color}; padding: 24px; border-radius: 8px 8px 0 0;">
        <h1 style="color: white; margin: 0; font-size: 20px;">Dinas Kesehatan</h1>
    </div>
    <div style="background: #f9f9f9; padding: 24px; border-radius: 0 0 8px 8px;">
        <p>Yth. {name},</p>
        <p>Permohonan <strong>{license_type}</strong> Anda telah <strong style="color: {color};">{label}</strong>.</p>
        <div style="background: white; border-left: 4px solid {color}; padding: 12px 16px; margin: 16px 0;">
            {reply}
        </div>
        <p style="color: #666; font-size: 13px;">Email ini dikirim otomatis, mohon tidak membalas.</p>
    </div>
</body>
</html>"#,
        color = decision.accent_color(),
        name = request.applicant.full_name,
        license_type = request.license_type.name,
        label = decision.label(),
        reply = reply_body,
    );

    OutgoingEmail {
        to: request.applicant.email.clone(),
        to_name: Some(request.applicant.full_name.clone()),
        subject,
        body_html,
    }
}

/// Sink for delivery audit records.
///
/// The repository is the production implementation; tests substitute an
/// in-memory one, the same way [`MailTransport`] is mocked.
#[async_trait::async_trait]
pub trait EmailLogSink: Send + Sync {
    async fn record(&self, log: &NewEmailLog) -> Result<(), sqlx::Error>;
}

#[async_trait::async_trait]
impl EmailLogSink for EmailLogRepository {
    async fn record(&self, log: &NewEmailLog) -> Result<(), sqlx::Error> {
        self.insert(log).await.map(|_| ())
    }
}

/// Sends one reply email and records the outcome.
///
/// Exactly one audit row per call, `sent` or `failed`. The row carries
/// the staff reply text, not the rendered HTML; the HTML only goes to
/// the transport. Awaitable so tests can drive it directly; production
/// code goes through [`spawn_dispatch`].
pub async fn dispatch_reply(
    email_logs: Arc<dyn EmailLogSink>,
    transport: Arc<dyn MailTransport>,
    request_id: uuid::Uuid,
    message: OutgoingEmail,
    reply_text: String,
) {
    let log = match transport.send(&message).await {
        Ok(()) => NewEmailLog::sent(
            request_id,
            message.to.clone(),
            message.subject.clone(),
            reply_text,
        ),
        Err(e) => {
            warn!(request_id = %request_id, to = %message.to, "Reply email failed: {}", e);
            NewEmailLog::failed(
                request_id,
                message.to.clone(),
                message.subject.clone(),
                reply_text,
                e.to_string(),
            )
        }
    };

    if let Err(e) = email_logs.record(&log).await {
        error!(request_id = %request_id, "Failed to record email log: {}", e);
    }
}

/// Runs [`dispatch_reply`] on a background task so the reply request
/// never waits on the transport.
pub fn spawn_dispatch(
    email_logs: Arc<dyn EmailLogSink>,
    transport: Arc<dyn MailTransport>,
    request_id: uuid::Uuid,
    message: OutgoingEmail,
    reply_text: String,
) -> JoinHandle<()> {
    tokio::spawn(dispatch_reply(
        email_logs, transport, request_id, message, reply_text,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use domain::models::{Applicant, EmailDeliveryStatus, LicenseType, RequestStatus};
    use domain::services::mail::MockMailTransport;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    struct RecordingSink {
        logs: Mutex<Vec<NewEmailLog>>,
    }

    impl RecordingSink {
        fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        fn logs(&self) -> Vec<NewEmailLog> {
            self.logs.lock().map(|v| v.clone()).unwrap_or_default()
        }
    }

    #[async_trait::async_trait]
    impl EmailLogSink for RecordingSink {
        async fn record(&self, log: &NewEmailLog) -> Result<(), sqlx::Error> {
            if let Ok(mut logs) = self.logs.lock() {
                logs.push(log.clone());
            }
            Ok(())
        }
    }

    fn sample_request() -> PermitRequest {
        let now = Utc::now();
        PermitRequest {
            id: Uuid::new_v4(),
            applicant: Applicant {
                id: Uuid::new_v4(),
                full_name: "Budi Santoso".to_string(),
                phone: "08123456789".to_string(),
                email: "budi@example.com".to_string(),
                address: "Jl. Merdeka 1".to_string(),
                created_at: now,
            },
            license_type: LicenseType {
                id: Uuid::new_v4(),
                name: "Izin Praktik Dokter".to_string(),
                description: String::new(),
                requirements: vec![],
                is_active: true,
                created_at: now,
                updated_at: now,
            },
            attachments: vec![],
            note: String::new(),
            status: RequestStatus::InReview,
            submitted_at: now,
            processed_at: Some(now),
            completed_at: None,
            reply_body: String::new(),
            staff_note: String::new(),
            handled_by: None,
            created_at: now,
        }
    }

    #[test]
    fn test_render_reply_email_approved() {
        let request = sample_request();
        let email = render_reply_email(&request, ReplyDecision::Approved, "Silakan ambil izin.");

        assert_eq!(email.to, "budi@example.com");
        assert_eq!(
            email.subject,
            "Balasan Permohonan Izin Praktik Dokter - Disetujui"
        );
        assert!(email.body_html.contains("#10b981"));
        assert!(email.body_html.contains("Silakan ambil izin."));
        assert!(email.body_html.contains("Budi Santoso"));
    }

    #[test]
    fn test_render_reply_email_rejected() {
        let request = sample_request();
        let email = render_reply_email(&request, ReplyDecision::Rejected, "Berkas belum lengkap.");

        assert_eq!(
            email.subject,
            "Balasan Permohonan Izin Praktik Dokter - Ditolak"
        );
        assert!(email.body_html.contains("#ef4444"));
    }

    #[tokio::test]
    async fn test_console_transport_always_succeeds() {
        let request = sample_request();
        let email = render_reply_email(&request, ReplyDecision::Approved, "OK");
        assert!(ConsoleTransport.send(&email).await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_transport_records_message() {
        let transport = MockMailTransport::new();
        let request = sample_request();
        let email = render_reply_email(&request, ReplyDecision::Approved, "OK");

        transport.send(&email).await.unwrap();
        let sent = transport.sent_messages();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "budi@example.com");
    }

    #[tokio::test]
    async fn test_dispatch_success_logs_one_sent_row_with_reply_text() {
        let sink = RecordingSink::new();
        let transport = MockMailTransport::new();
        let request = sample_request();
        let email = render_reply_email(&request, ReplyDecision::Approved, "Silakan ambil izin.");

        dispatch_reply(
            sink.clone(),
            transport,
            request.id,
            email,
            "Silakan ambil izin.".to_string(),
        )
        .await;

        let logs = sink.logs();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].status, EmailDeliveryStatus::Sent);
        assert_eq!(logs[0].recipient, "budi@example.com");
        // The audit row carries the staff reply, not the HTML template.
        assert_eq!(logs[0].body, "Silakan ambil izin.");
        assert!(logs[0].error.is_none());
    }

    #[tokio::test]
    async fn test_dispatch_failure_logs_one_failed_row() {
        let sink = RecordingSink::new();
        let transport = MockMailTransport::failing();
        let request = sample_request();
        let email = render_reply_email(&request, ReplyDecision::Rejected, "Berkas belum lengkap.");

        dispatch_reply(
            sink.clone(),
            transport,
            request.id,
            email,
            "Berkas belum lengkap.".to_string(),
        )
        .await;

        let logs = sink.logs();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].status, EmailDeliveryStatus::Failed);
        assert_eq!(logs[0].body, "Berkas belum lengkap.");
        assert!(logs[0].error.is_some());
    }

    #[test]
    fn test_build_transport_defaults_to_console() {
        let config = EmailConfig::default();
        // No panic and usable as a trait object is all we can assert here.
        let _transport = build_transport(&config);
    }
}
