//! Applicant repository.

use domain::models::{Applicant, NewApplicant};
use sqlx::PgPool;

use crate::entities::ApplicantEntity;

/// Repository for applicant database operations.
#[derive(Clone)]
pub struct ApplicantRepository {
    pool: PgPool,
}

impl ApplicantRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new applicant. Every submission gets its own row, even
    /// when the same person applies twice.
    pub async fn insert(&self, input: &NewApplicant) -> Result<Applicant, sqlx::Error> {
        let entity = sqlx::query_as::<_, ApplicantEntity>(
            r#"
            INSERT INTO applicants (full_name, phone, email, address)
            VALUES ($1, $2, $3, $4)
            RETURNING id, full_name, phone, email, address, created_at
            "#,
        )
        .bind(&input.full_name)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(&input.address)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity_to_domain(entity))
    }
}

fn entity_to_domain(entity: ApplicantEntity) -> Applicant {
    Applicant {
        id: entity.id,
        full_name: entity.full_name,
        phone: entity.phone,
        email: entity.email,
        address: entity.address,
        created_at: entity.created_at,
    }
}
