pub mod auth;
pub mod logging;

pub use auth::{require_auth, require_super_admin};
