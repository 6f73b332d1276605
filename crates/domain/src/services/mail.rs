//! Outbound mail transport abstraction.
//!
//! The transport only knows how to hand one message to a provider; message
//! composition and delivery logging live with the caller. Tests inject
//! [`MockMailTransport`] to make dispatch deterministic.

use std::sync::{Arc, Mutex};

use thiserror::Error;

/// Errors that can occur while handing a message to the provider.
#[derive(Debug, Error)]
pub enum MailError {
    #[error("Mail transport not configured")]
    NotConfigured,

    #[error("Failed to send email: {0}")]
    SendFailed(String),

    #[error("Provider error: {0}")]
    ProviderError(String),
}

/// A fully composed outbound message.
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    /// Recipient email address
    pub to: String,
    /// Recipient name (optional)
    pub to_name: Option<String>,
    /// Email subject
    pub subject: String,
    /// HTML body
    pub body_html: String,
}

/// Transport trait for sending one email.
#[async_trait::async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, message: &OutgoingEmail) -> Result<(), MailError>;
}

/// Mock transport for development and testing.
///
/// Records every message it receives and optionally simulates failures.
#[derive(Debug, Default)]
pub struct MockMailTransport {
    simulate_failure: bool,
    sent: Mutex<Vec<OutgoingEmail>>,
}

impl MockMailTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A transport whose every send fails.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            simulate_failure: true,
            sent: Mutex::new(Vec::new()),
        })
    }

    /// Messages successfully "sent" so far, in order.
    pub fn sent_messages(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl MailTransport for MockMailTransport {
    async fn send(&self, message: &OutgoingEmail) -> Result<(), MailError> {
        if self.simulate_failure {
            tracing::warn!(
                to = %message.to,
                subject = %message.subject,
                "Mock mail transport simulating failure"
            );
            return Err(MailError::SendFailed("simulated failure".to_string()));
        }

        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            "Mock: would send email"
        );
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(message.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> OutgoingEmail {
        OutgoingEmail {
            to: "pemohon@example.com".to_string(),
            to_name: Some("Budi".to_string()),
            subject: "Balasan Permohonan".to_string(),
            body_html: "<p>Selamat</p>".to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_transport_records_sent_messages() {
        let transport = MockMailTransport::new();

        transport.send(&message()).await.unwrap();
        transport.send(&message()).await.unwrap();

        let sent = transport.sent_messages();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "pemohon@example.com");
    }

    #[tokio::test]
    async fn test_failing_transport_records_nothing() {
        let transport = MockMailTransport::failing();

        let result = transport.send(&message()).await;
        assert!(matches!(result, Err(MailError::SendFailed(_))));
        assert!(transport.sent_messages().is_empty());
    }
}
