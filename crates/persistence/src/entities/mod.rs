//! Database row entities, converted to domain models by the repositories.

pub mod admin;
pub mod applicant;
pub mod attachment;
pub mod email_log;
pub mod license_type;
pub mod notification;
pub mod request;

pub use admin::AdminEntity;
pub use applicant::ApplicantEntity;
pub use attachment::AttachmentEntity;
pub use email_log::EmailLogEntity;
pub use license_type::LicenseTypeEntity;
pub use notification::NotificationEntity;
pub use request::RequestRowEntity;
