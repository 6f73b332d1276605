//! Domain model definitions.

pub mod admin;
pub mod dashboard;
pub mod email_log;
pub mod license_type;
pub mod notification;
pub mod request;

pub use admin::{
    Admin, AdminInfo, ChangePasswordRequest, CreateAdminRequest, LoginRequest, LoginResponse,
    ResetPasswordRequest, UpdateAdminRequest,
};
pub use dashboard::DashboardStats;
pub use email_log::{EmailDeliveryStatus, EmailLog, NewEmailLog};
pub use license_type::{CreateLicenseTypeRequest, LicenseType, UpdateLicenseTypeRequest};
pub use notification::{new_request_message, Notification};
pub use request::{
    Applicant, Attachment, ListRequestsQuery, NewApplicant, NewAttachment, PermitRequest,
    ReplyDecision, RequestList, RequestStatus, SendReplyRequest, SubmitRequestInput,
    UpdateStatusRequest,
};

pub use shared::jwt::AdminRole;
