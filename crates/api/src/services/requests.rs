//! Permit request lifecycle service.
//!
//! Owns the flow from public submission through staff decision: status
//! transitions, reply dispatch and the notification fan-out. Handlers
//! stay thin and call into here.

use std::sync::Arc;

use domain::models::{
    new_request_message, DashboardStats, ListRequestsQuery, NewAttachment, PermitRequest,
    RequestList, RequestStatus, SendReplyRequest, SubmitRequestInput, UpdateStatusRequest,
};
use domain::services::mail::MailTransport;
use persistence::repositories::{
    AdminRepository, ApplicantRepository, EmailLogRepository, LicenseTypeRepository,
    NotificationRepository, RequestRepository,
};
use shared::pagination::{PageMeta, PageQuery};
use sqlx::PgPool;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::services::email;

/// How many requests the dashboard's recent list shows.
const RECENT_LIMIT: i64 = 5;

#[derive(Debug, Error)]
pub enum RequestServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Service coordinating the request lifecycle.
#[derive(Clone)]
pub struct RequestService {
    requests: RequestRepository,
    applicants: ApplicantRepository,
    license_types: LicenseTypeRepository,
    notifications: NotificationRepository,
    admins: AdminRepository,
    email_logs: EmailLogRepository,
    mailer: Arc<dyn MailTransport>,
    notify_username: String,
}

impl RequestService {
    pub fn new(pool: PgPool, mailer: Arc<dyn MailTransport>, notify_username: String) -> Self {
        Self {
            requests: RequestRepository::new(pool.clone()),
            applicants: ApplicantRepository::new(pool.clone()),
            license_types: LicenseTypeRepository::new(pool.clone()),
            notifications: NotificationRepository::new(pool.clone()),
            admins: AdminRepository::new(pool.clone()),
            email_logs: EmailLogRepository::new(pool),
            mailer,
            notify_username,
        }
    }

    /// Accept a public submission: applicant row, request row in the
    /// initial status, attachments, then the notification fan-out on a
    /// background task.
    pub async fn create(
        &self,
        input: SubmitRequestInput,
        files: Vec<NewAttachment>,
    ) -> Result<PermitRequest, RequestServiceError> {
        let license_type = self
            .license_types
            .find_by_id(input.license_type_id)
            .await?
            .ok_or_else(|| {
                RequestServiceError::NotFound("Jenis perizinan tidak ditemukan".to_string())
            })?;
        if !license_type.is_active {
            return Err(RequestServiceError::Validation(
                "Jenis perizinan tidak aktif".to_string(),
            ));
        }
        shared::validation::validate_text_length(&input.note)
            .map_err(|_| RequestServiceError::Validation("Catatan terlalu panjang".to_string()))?;

        let applicant = self.applicants.insert(&input.applicant).await?;
        let request_id = self
            .requests
            .insert(applicant.id, license_type.id, &input.note)
            .await?;
        self.requests.insert_attachments(request_id, &files).await?;

        let request = self.requests.find_by_id(request_id).await?.ok_or_else(|| {
            RequestServiceError::NotFound("Permohonan tidak ditemukan".to_string())
        })?;

        info!(
            request_id = %request.id,
            license_type = %request.license_type.name,
            "New permit request submitted"
        );

        self.spawn_new_request_notification(&request);

        Ok(request)
    }

    /// One request with everything hydrated.
    pub async fn get(&self, id: Uuid) -> Result<PermitRequest, RequestServiceError> {
        self.requests
            .find_by_id(id)
            .await?
            .ok_or_else(|| RequestServiceError::NotFound("Permohonan tidak ditemukan".to_string()))
    }

    /// One page of requests with total count metadata.
    pub async fn list(
        &self,
        query: &ListRequestsQuery,
    ) -> Result<RequestList, RequestServiceError> {
        let (data, total) = self.requests.list(query).await?;

        let page = PageQuery { page: query.page, per_page: query.per_page };
        let meta = PageMeta::new(total, page.page(), page.per_page());

        Ok(RequestList { data, meta })
    }

    /// All requests in one status, newest first.
    pub async fn list_by_status(
        &self,
        status: RequestStatus,
    ) -> Result<Vec<PermitRequest>, RequestServiceError> {
        Ok(self.requests.list_by_status(status).await?)
    }

    /// The most recently submitted requests.
    pub async fn recent(&self) -> Result<Vec<PermitRequest>, RequestServiceError> {
        Ok(self.requests.recent(RECENT_LIMIT).await?)
    }

    /// Move a request to a new status and record who did it.
    pub async fn update_status(
        &self,
        id: Uuid,
        input: &UpdateStatusRequest,
        admin_id: Uuid,
    ) -> Result<PermitRequest, RequestServiceError> {
        let updated = self
            .requests
            .update_status(id, input.status, &input.staff_note, admin_id)
            .await?;
        if updated == 0 {
            return Err(RequestServiceError::NotFound(
                "Permohonan tidak ditemukan".to_string(),
            ));
        }

        self.get(id).await
    }

    /// Record a staff decision with its reply text, then dispatch the
    /// reply email on a background task. The caller gets the updated
    /// request immediately; a transport failure only shows up in the
    /// email log.
    pub async fn send_reply(
        &self,
        id: Uuid,
        input: &SendReplyRequest,
        admin_id: Uuid,
    ) -> Result<PermitRequest, RequestServiceError> {
        let updated = self
            .requests
            .update_reply(id, input.status.status(), &input.reply_body, admin_id)
            .await?;
        if updated == 0 {
            return Err(RequestServiceError::NotFound(
                "Permohonan tidak ditemukan".to_string(),
            ));
        }

        let request = self.get(id).await?;

        let message = email::render_reply_email(&request, input.status, &input.reply_body);
        email::spawn_dispatch(
            Arc::new(self.email_logs.clone()),
            self.mailer.clone(),
            request.id,
            message,
            input.reply_body.clone(),
        );

        Ok(request)
    }

    /// Request counts per status, computed fresh.
    pub async fn statistics(&self) -> Result<DashboardStats, RequestServiceError> {
        Ok(self.requests.count_by_status().await?)
    }

    /// Notify the designated staff account about a new submission.
    /// Fire and forget: a failure is logged and never fails the
    /// submission itself.
    fn spawn_new_request_notification(&self, request: &PermitRequest) {
        let admins = self.admins.clone();
        let notifications = self.notifications.clone();
        let username = self.notify_username.clone();
        let request_id = request.id;
        let message = new_request_message(&request.applicant.full_name, &request.license_type.name);

        tokio::spawn(async move {
            let recipient = match admins.find_by_username(&username).await {
                Ok(Some(admin)) => admin,
                Ok(None) => {
                    error!(username = %username, "Notification recipient not found");
                    return;
                }
                Err(e) => {
                    error!("Failed to look up notification recipient: {}", e);
                    return;
                }
            };

            if let Err(e) = notifications
                .insert(recipient.id, request_id, &message)
                .await
            {
                error!(request_id = %request_id, "Failed to insert notification: {}", e);
            }
        });
    }
}
