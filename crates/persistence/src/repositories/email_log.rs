//! Email delivery log repository.

use domain::models::{EmailDeliveryStatus, EmailLog, NewEmailLog};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::EmailLogEntity;

/// Repository for the append-only email delivery audit trail.
#[derive(Clone)]
pub struct EmailLogRepository {
    pool: PgPool,
}

impl EmailLogRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append one delivery record.
    pub async fn insert(&self, input: &NewEmailLog) -> Result<EmailLog, sqlx::Error> {
        let entity = sqlx::query_as::<_, EmailLogEntity>(
            r#"
            INSERT INTO email_logs (request_id, recipient, subject, body, status, error, sent_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, request_id, recipient, subject, body, status, error, sent_at, created_at
            "#,
        )
        .bind(input.request_id)
        .bind(&input.recipient)
        .bind(&input.subject)
        .bind(&input.body)
        .bind(input.status.to_string())
        .bind(&input.error)
        .bind(input.sent_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity_to_domain(entity))
    }

    /// List delivery records for one request, newest first.
    pub async fn list_for_request(&self, request_id: Uuid) -> Result<Vec<EmailLog>, sqlx::Error> {
        let entities = sqlx::query_as::<_, EmailLogEntity>(
            r#"
            SELECT id, request_id, recipient, subject, body, status, error, sent_at, created_at
            FROM email_logs
            WHERE request_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(request_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(entity_to_domain).collect())
    }
}

fn entity_to_domain(entity: EmailLogEntity) -> EmailLog {
    EmailLog {
        id: entity.id,
        request_id: entity.request_id,
        recipient: entity.recipient,
        subject: entity.subject,
        body: entity.body,
        status: entity
            .status
            .parse::<EmailDeliveryStatus>()
            .unwrap_or(EmailDeliveryStatus::Pending),
        error: entity.error,
        sent_at: entity.sent_at,
        created_at: entity.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_entity_to_domain_conversion() {
        let now = Utc::now();
        let entity = EmailLogEntity {
            id: Uuid::new_v4(),
            request_id: Uuid::new_v4(),
            recipient: "budi@example.com".to_string(),
            subject: "Balasan Permohonan Izin Penelitian - Disetujui".to_string(),
            body: "<html></html>".to_string(),
            status: "sent".to_string(),
            error: None,
            sent_at: Some(now),
            created_at: now,
        };

        let log = entity_to_domain(entity);
        assert_eq!(log.status, EmailDeliveryStatus::Sent);
        assert!(log.error.is_none());
        assert!(log.sent_at.is_some());
    }
}
