pub mod admins;
pub mod auth;
pub mod dashboard;
pub mod files;
pub mod health;
pub mod license_types;
pub mod notifications;
pub mod requests;
