pub mod bootstrap;
pub mod email;
pub mod requests;
pub mod storage;
