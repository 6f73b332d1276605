//! sqlx-backed repositories. Each wraps a [`sqlx::PgPool`] and converts
//! row entities into domain models.

pub mod admin;
pub mod applicant;
pub mod email_log;
pub mod license_type;
pub mod notification;
pub mod request;

pub use admin::{admin_entity_to_domain, AdminRepository};
pub use applicant::ApplicantRepository;
pub use email_log::EmailLogRepository;
pub use license_type::LicenseTypeRepository;
pub use notification::NotificationRepository;
pub use request::RequestRepository;
