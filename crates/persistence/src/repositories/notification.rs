//! Notification repository.

use domain::models::Notification;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::NotificationEntity;

/// At most this many notifications come back per listing, newest first.
const LIST_LIMIT: i64 = 50;

/// Repository for in-app notification database operations.
#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert an unread notification for one admin.
    pub async fn insert(
        &self,
        admin_id: Uuid,
        request_id: Uuid,
        message: &str,
    ) -> Result<Notification, sqlx::Error> {
        let entity = sqlx::query_as::<_, NotificationEntity>(
            r#"
            INSERT INTO notifications (admin_id, request_id, message)
            VALUES ($1, $2, $3)
            RETURNING id, admin_id, request_id, message, is_read, created_at
            "#,
        )
        .bind(admin_id)
        .bind(request_id)
        .bind(message)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity_to_domain(entity))
    }

    /// List an admin's notifications, newest first, capped at 50.
    pub async fn list_for_admin(
        &self,
        admin_id: Uuid,
        unread_only: bool,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let read_filter = if unread_only { "AND is_read = FALSE" } else { "" };

        let entities = sqlx::query_as::<_, NotificationEntity>(&format!(
            r#"
            SELECT id, admin_id, request_id, message, is_read, created_at
            FROM notifications
            WHERE admin_id = $1 {read_filter}
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        ))
        .bind(admin_id)
        .bind(LIST_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(entity_to_domain).collect())
    }

    /// Count an admin's unread notifications.
    pub async fn count_unread(&self, admin_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE admin_id = $1 AND is_read = FALSE",
        )
        .bind(admin_id)
        .fetch_one(&self.pool)
        .await
    }

    /// Mark one notification read. Idempotent: marking an already-read
    /// notification succeeds and changes nothing.
    pub async fn mark_read(&self, admin_id: Uuid, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE id = $1 AND admin_id = $2",
        )
        .bind(id)
        .bind(admin_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Mark all of an admin's notifications read.
    pub async fn mark_all_read(&self, admin_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE admin_id = $1 AND is_read = FALSE",
        )
        .bind(admin_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

fn entity_to_domain(entity: NotificationEntity) -> Notification {
    Notification {
        id: entity.id,
        admin_id: entity.admin_id,
        request_id: entity.request_id,
        message: entity.message,
        is_read: entity.is_read,
        created_at: entity.created_at,
    }
}
