//! Permit request repository.
//!
//! Reads return the fully hydrated aggregate: applicant and license
//! type come from one join, attachments from a second query batched
//! over the whole page.

use std::collections::HashMap;

use domain::models::{
    Applicant, Attachment, DashboardStats, LicenseType, ListRequestsQuery, NewAttachment,
    PermitRequest, RequestStatus,
};
use shared::pagination::PageQuery;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{AttachmentEntity, RequestRowEntity};

const REQUEST_SELECT: &str = r#"
    SELECT r.id, r.note, r.status, r.submitted_at, r.processed_at, r.completed_at,
           r.reply_body, r.staff_note, r.handled_by, r.created_at,
           a.id AS applicant_id, a.full_name AS applicant_full_name,
           a.phone AS applicant_phone, a.email AS applicant_email,
           a.address AS applicant_address, a.created_at AS applicant_created_at,
           lt.id AS license_type_id, lt.name AS license_name,
           lt.description AS license_description, lt.requirements AS license_requirements,
           lt.is_active AS license_is_active, lt.created_at AS license_created_at,
           lt.updated_at AS license_updated_at
    FROM requests r
    JOIN applicants a ON a.id = r.applicant_id
    JOIN license_types lt ON lt.id = r.license_type_id
"#;

/// Repository for permit request database operations.
#[derive(Clone)]
pub struct RequestRepository {
    pool: PgPool,
}

impl RequestRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new request in the initial status.
    pub async fn insert(
        &self,
        applicant_id: Uuid,
        license_type_id: Uuid,
        note: &str,
    ) -> Result<Uuid, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            INSERT INTO requests (applicant_id, license_type_id, note)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(applicant_id)
        .bind(license_type_id)
        .bind(note)
        .fetch_one(&self.pool)
        .await
    }

    /// Attach staged files to a request.
    pub async fn insert_attachments(
        &self,
        request_id: Uuid,
        files: &[NewAttachment],
    ) -> Result<(), sqlx::Error> {
        for file in files {
            sqlx::query(
                r#"
                INSERT INTO attachments (request_id, stored_name, original_name, path, size_bytes, mime_type)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(request_id)
            .bind(&file.stored_name)
            .bind(&file.original_name)
            .bind(&file.path)
            .bind(file.size_bytes)
            .bind(&file.mime_type)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    /// Find a request by ID with applicant, license type and attachments.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<PermitRequest>, sqlx::Error> {
        let row = sqlx::query_as::<_, RequestRowEntity>(&format!(
            "{REQUEST_SELECT} WHERE r.id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let mut attachments = self.load_attachments(&[row.id]).await?;
                let files = attachments.remove(&row.id).unwrap_or_default();
                Ok(Some(entity_to_domain(row, files)))
            }
            None => Ok(None),
        }
    }

    /// List requests with pagination, optional status filter and a
    /// case-insensitive search over applicant name and email.
    ///
    /// Returns one page plus the total count for the same filters.
    pub async fn list(
        &self,
        query: &ListRequestsQuery,
    ) -> Result<(Vec<PermitRequest>, i64), sqlx::Error> {
        let page = PageQuery { page: query.page, per_page: query.per_page };

        let mut conditions: Vec<String> = Vec::new();
        let mut param_count = 0;

        if query.status.is_some() {
            param_count += 1;
            conditions.push(format!("r.status = ${param_count}"));
        }

        let search_term = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{s}%"));
        if search_term.is_some() {
            param_count += 1;
            conditions.push(format!(
                "(a.full_name ILIKE ${param_count} OR a.email ILIKE ${param_count})"
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let count_query = format!(
            "SELECT COUNT(*) FROM requests r JOIN applicants a ON a.id = r.applicant_id {where_clause}",
        );
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_query);
        if let Some(status) = query.status {
            count_builder = count_builder.bind(status.as_str());
        }
        if let Some(ref term) = search_term {
            count_builder = count_builder.bind(term);
        }
        let total = count_builder.fetch_one(&self.pool).await?;

        let list_query = format!(
            "{REQUEST_SELECT} {where_clause} ORDER BY r.submitted_at DESC LIMIT ${} OFFSET ${}",
            param_count + 1,
            param_count + 2,
        );
        let mut list_builder = sqlx::query_as::<_, RequestRowEntity>(&list_query);
        if let Some(status) = query.status {
            list_builder = list_builder.bind(status.as_str());
        }
        if let Some(ref term) = search_term {
            list_builder = list_builder.bind(term);
        }
        let rows = list_builder
            .bind(page.per_page())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        let requests = self.hydrate(rows).await?;
        Ok((requests, total))
    }

    /// List all requests in one status, newest first.
    pub async fn list_by_status(
        &self,
        status: RequestStatus,
    ) -> Result<Vec<PermitRequest>, sqlx::Error> {
        let rows = sqlx::query_as::<_, RequestRowEntity>(&format!(
            "{REQUEST_SELECT} WHERE r.status = $1 ORDER BY r.submitted_at DESC",
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        self.hydrate(rows).await
    }

    /// The most recently submitted requests, for the dashboard.
    pub async fn recent(&self, limit: i64) -> Result<Vec<PermitRequest>, sqlx::Error> {
        let rows = sqlx::query_as::<_, RequestRowEntity>(&format!(
            "{REQUEST_SELECT} ORDER BY r.submitted_at DESC LIMIT $1",
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        self.hydrate(rows).await
    }

    /// Move a request to a new status.
    ///
    /// Entering `in_review` stamps the processing timestamp, overwriting
    /// any earlier one. Entering a terminal status stamps completion.
    /// Other transitions leave both timestamps untouched.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: RequestStatus,
        staff_note: &str,
        handled_by: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE requests
            SET status = $2,
                staff_note = $3,
                handled_by = $4,
                processed_at = CASE WHEN $2 = 'in_review' THEN NOW() ELSE processed_at END,
                completed_at = CASE WHEN $2 IN ('approved', 'rejected') THEN NOW() ELSE completed_at END,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .bind(staff_note)
        .bind(handled_by)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Record a staff reply: final status, reply text and completion
    /// timestamp in one statement.
    pub async fn update_reply(
        &self,
        id: Uuid,
        status: RequestStatus,
        reply_body: &str,
        handled_by: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE requests
            SET status = $2,
                reply_body = $3,
                handled_by = $4,
                completed_at = NOW(),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .bind(reply_body)
        .bind(handled_by)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Request counts per status, computed fresh from the table.
    pub async fn count_by_status(&self) -> Result<DashboardStats, sqlx::Error> {
        let (total, new, in_review, approved, rejected) =
            sqlx::query_as::<_, (i64, i64, i64, i64, i64)>(
                r#"
                SELECT COUNT(*),
                       COUNT(*) FILTER (WHERE status = 'new'),
                       COUNT(*) FILTER (WHERE status = 'in_review'),
                       COUNT(*) FILTER (WHERE status = 'approved'),
                       COUNT(*) FILTER (WHERE status = 'rejected')
                FROM requests
                "#,
            )
            .fetch_one(&self.pool)
            .await?;

        Ok(DashboardStats::new(total, new, in_review, approved, rejected))
    }

    /// Find an attachment by its on-disk name, for downloads.
    pub async fn find_attachment_by_stored_name(
        &self,
        stored_name: &str,
    ) -> Result<Option<Attachment>, sqlx::Error> {
        let entity = sqlx::query_as::<_, AttachmentEntity>(
            r#"
            SELECT id, request_id, stored_name, original_name, path, size_bytes, mime_type, created_at
            FROM attachments
            WHERE stored_name = $1
            "#,
        )
        .bind(stored_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(attachment_to_domain))
    }

    async fn hydrate(
        &self,
        rows: Vec<RequestRowEntity>,
    ) -> Result<Vec<PermitRequest>, sqlx::Error> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut attachments = self.load_attachments(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let files = attachments.remove(&row.id).unwrap_or_default();
                entity_to_domain(row, files)
            })
            .collect())
    }

    async fn load_attachments(
        &self,
        request_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Attachment>>, sqlx::Error> {
        if request_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let entities = sqlx::query_as::<_, AttachmentEntity>(
            r#"
            SELECT id, request_id, stored_name, original_name, path, size_bytes, mime_type, created_at
            FROM attachments
            WHERE request_id = ANY($1)
            ORDER BY created_at ASC
            "#,
        )
        .bind(request_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<Attachment>> = HashMap::new();
        for entity in entities {
            grouped
                .entry(entity.request_id)
                .or_default()
                .push(attachment_to_domain(entity));
        }

        Ok(grouped)
    }
}

/// Convert a join row plus its attachments to the domain aggregate. An
/// unknown status string falls back to the initial status rather than
/// failing the whole read.
fn entity_to_domain(row: RequestRowEntity, attachments: Vec<Attachment>) -> PermitRequest {
    let status = row.status.parse::<RequestStatus>().unwrap_or(RequestStatus::New);

    PermitRequest {
        id: row.id,
        applicant: Applicant {
            id: row.applicant_id,
            full_name: row.applicant_full_name,
            phone: row.applicant_phone,
            email: row.applicant_email,
            address: row.applicant_address,
            created_at: row.applicant_created_at,
        },
        license_type: LicenseType {
            id: row.license_type_id,
            name: row.license_name,
            description: row.license_description,
            requirements: serde_json::from_value(row.license_requirements).unwrap_or_default(),
            is_active: row.license_is_active,
            created_at: row.license_created_at,
            updated_at: row.license_updated_at,
        },
        attachments,
        note: row.note,
        status,
        submitted_at: row.submitted_at,
        processed_at: row.processed_at,
        completed_at: row.completed_at,
        reply_body: row.reply_body,
        staff_note: row.staff_note,
        handled_by: row.handled_by,
        created_at: row.created_at,
    }
}

fn attachment_to_domain(entity: AttachmentEntity) -> Attachment {
    Attachment {
        id: entity.id,
        request_id: entity.request_id,
        stored_name: entity.stored_name,
        original_name: entity.original_name,
        path: entity.path,
        size_bytes: entity.size_bytes,
        mime_type: entity.mime_type,
        created_at: entity.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn row(status: &str) -> RequestRowEntity {
        let now = Utc::now();
        RequestRowEntity {
            id: Uuid::new_v4(),
            note: "Mohon diproses".to_string(),
            status: status.to_string(),
            submitted_at: now,
            processed_at: None,
            completed_at: None,
            reply_body: String::new(),
            staff_note: String::new(),
            handled_by: None,
            created_at: now,
            applicant_id: Uuid::new_v4(),
            applicant_full_name: "Budi Santoso".to_string(),
            applicant_phone: "08123456789".to_string(),
            applicant_email: "budi@example.com".to_string(),
            applicant_address: "Jl. Merdeka 1".to_string(),
            applicant_created_at: now,
            license_type_id: Uuid::new_v4(),
            license_name: "Izin Penelitian".to_string(),
            license_description: String::new(),
            license_requirements: serde_json::json!(["KTP", "Proposal"]),
            license_is_active: true,
            license_created_at: now,
            license_updated_at: now,
        }
    }

    #[test]
    fn test_entity_to_domain_conversion() {
        let request = entity_to_domain(row("in_review"), vec![]);

        assert_eq!(request.status, RequestStatus::InReview);
        assert_eq!(request.applicant.full_name, "Budi Santoso");
        assert_eq!(request.license_type.requirements, vec!["KTP", "Proposal"]);
        assert!(request.attachments.is_empty());
    }

    #[test]
    fn test_unknown_status_falls_back_to_initial() {
        let request = entity_to_domain(row("archived"), vec![]);
        assert_eq!(request.status, RequestStatus::New);
    }
}
