//! License type repository.

use domain::models::{CreateLicenseTypeRequest, LicenseType, UpdateLicenseTypeRequest};
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::LicenseTypeEntity;

const LICENSE_TYPE_COLUMNS: &str =
    "id, name, description, requirements, is_active, created_at, updated_at";

/// Repository for license type database operations.
///
/// Deletion is always soft: requests keep referencing removed types, so
/// rows only ever gain a `deleted_at` timestamp.
#[derive(Clone)]
pub struct LicenseTypeRepository {
    pool: PgPool,
}

impl LicenseTypeRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new license type.
    pub async fn insert(
        &self,
        input: &CreateLicenseTypeRequest,
    ) -> Result<LicenseType, sqlx::Error> {
        let requirements =
            serde_json::to_value(&input.requirements).unwrap_or(JsonValue::Array(vec![]));

        let entity = sqlx::query_as::<_, LicenseTypeEntity>(&format!(
            r#"
            INSERT INTO license_types (name, description, requirements, is_active)
            VALUES ($1, $2, $3, $4)
            RETURNING {LICENSE_TYPE_COLUMNS}
            "#,
        ))
        .bind(&input.name)
        .bind(&input.description)
        .bind(requirements)
        .bind(input.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity_to_domain(entity))
    }

    /// List license types, oldest first. `active_only` restricts to
    /// types shown on the public submission form.
    pub async fn list(&self, active_only: bool) -> Result<Vec<LicenseType>, sqlx::Error> {
        let active_filter = if active_only { "AND is_active = TRUE" } else { "" };

        let entities = sqlx::query_as::<_, LicenseTypeEntity>(&format!(
            r#"
            SELECT {LICENSE_TYPE_COLUMNS}
            FROM license_types
            WHERE deleted_at IS NULL {active_filter}
            ORDER BY created_at ASC
            "#,
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.into_iter().map(entity_to_domain).collect())
    }

    /// Find a license type by ID. Soft-deleted types are not found.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<LicenseType>, sqlx::Error> {
        let entity = sqlx::query_as::<_, LicenseTypeEntity>(&format!(
            "SELECT {LICENSE_TYPE_COLUMNS} FROM license_types WHERE id = $1 AND deleted_at IS NULL",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(entity_to_domain))
    }

    /// Update a license type. Absent fields keep their current value.
    pub async fn update(
        &self,
        id: Uuid,
        input: &UpdateLicenseTypeRequest,
    ) -> Result<Option<LicenseType>, sqlx::Error> {
        let requirements = input
            .requirements
            .as_ref()
            .map(|r| serde_json::to_value(r).unwrap_or(JsonValue::Array(vec![])));

        let entity = sqlx::query_as::<_, LicenseTypeEntity>(&format!(
            r#"
            UPDATE license_types
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                requirements = COALESCE($4, requirements),
                is_active = COALESCE($5, is_active),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {LICENSE_TYPE_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(requirements)
        .bind(input.is_active)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(entity_to_domain))
    }

    /// Soft-delete a license type. Idempotent on already-deleted rows.
    pub async fn soft_delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE license_types SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Count license types, including soft-deleted ones. Used by the
    /// startup bootstrap to decide whether to seed defaults.
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM license_types")
            .fetch_one(&self.pool)
            .await
    }
}

/// Convert entity to domain model. A malformed requirements document
/// decodes to an empty checklist.
pub(crate) fn entity_to_domain(entity: LicenseTypeEntity) -> LicenseType {
    LicenseType {
        id: entity.id,
        name: entity.name,
        description: entity.description,
        requirements: serde_json::from_value(entity.requirements).unwrap_or_default(),
        is_active: entity.is_active,
        created_at: entity.created_at,
        updated_at: entity.updated_at,
    }
}
