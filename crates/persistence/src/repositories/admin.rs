//! Admin account repository.

use domain::models::{Admin, AdminRole, CreateAdminRequest, UpdateAdminRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::AdminEntity;

const ADMIN_COLUMNS: &str =
    "id, username, password_hash, email, full_name, role, is_active, created_at, updated_at";

/// Repository for staff account database operations.
#[derive(Clone)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new admin with an already-hashed password.
    pub async fn insert(
        &self,
        input: &CreateAdminRequest,
        password_hash: &str,
    ) -> Result<Admin, sqlx::Error> {
        let entity = sqlx::query_as::<_, AdminEntity>(&format!(
            r#"
            INSERT INTO admins (username, password_hash, email, full_name, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {ADMIN_COLUMNS}
            "#,
        ))
        .bind(&input.username)
        .bind(password_hash)
        .bind(&input.email)
        .bind(&input.full_name)
        .bind(input.role.to_string())
        .fetch_one(&self.pool)
        .await?;

        Ok(admin_entity_to_domain(&entity))
    }

    /// Find an admin by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Admin>, sqlx::Error> {
        let entity = sqlx::query_as::<_, AdminEntity>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admins WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.as_ref().map(admin_entity_to_domain))
    }

    /// Find an admin by username, including the password hash.
    ///
    /// Returns the raw entity: the login flow needs the hash for
    /// verification and converts to the domain model afterwards.
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminEntity>, sqlx::Error> {
        sqlx::query_as::<_, AdminEntity>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admins WHERE username = $1",
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
    }

    /// List all admins, newest first.
    pub async fn list(&self) -> Result<Vec<Admin>, sqlx::Error> {
        let entities = sqlx::query_as::<_, AdminEntity>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admins ORDER BY created_at DESC",
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(entities.iter().map(admin_entity_to_domain).collect())
    }

    /// Update an admin. Absent fields keep their current value.
    pub async fn update(
        &self,
        id: Uuid,
        input: &UpdateAdminRequest,
    ) -> Result<Option<Admin>, sqlx::Error> {
        let entity = sqlx::query_as::<_, AdminEntity>(&format!(
            r#"
            UPDATE admins
            SET username = COALESCE($2, username),
                email = COALESCE($3, email),
                full_name = COALESCE($4, full_name),
                role = COALESCE($5, role),
                is_active = COALESCE($6, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {ADMIN_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(&input.username)
        .bind(&input.email)
        .bind(&input.full_name)
        .bind(input.role.map(|r| r.to_string()))
        .bind(input.is_active)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.as_ref().map(admin_entity_to_domain))
    }

    /// Replace an admin's password hash.
    pub async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("UPDATE admins SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(password_hash)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }

    /// Delete an admin. Requests they handled keep a NULL handler.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM admins WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Count all admins. Used by the startup bootstrap.
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM admins")
            .fetch_one(&self.pool)
            .await
    }
}

/// Convert entity to domain model. An unknown role string falls back to
/// the least-privileged role rather than failing the whole read.
pub fn admin_entity_to_domain(entity: &AdminEntity) -> Admin {
    Admin {
        id: entity.id,
        username: entity.username.clone(),
        email: entity.email.clone(),
        full_name: entity.full_name.clone(),
        role: entity.role.parse::<AdminRole>().unwrap_or(AdminRole::Admin),
        is_active: entity.is_active,
        created_at: entity.created_at,
        updated_at: entity.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entity(role: &str) -> AdminEntity {
        let now = Utc::now();
        AdminEntity {
            id: Uuid::new_v4(),
            username: "petugas1".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            email: "petugas@dinkes.go.id".to_string(),
            full_name: "Petugas Satu".to_string(),
            role: role.to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_entity_to_domain_conversion() {
        let admin = admin_entity_to_domain(&entity("super_admin"));
        assert_eq!(admin.role, AdminRole::SuperAdmin);
        assert_eq!(admin.username, "petugas1");
        assert!(admin.is_active);
    }

    #[test]
    fn test_unknown_role_falls_back_to_least_privilege() {
        let admin = admin_entity_to_domain(&entity("owner"));
        assert_eq!(admin.role, AdminRole::Admin);
    }
}
