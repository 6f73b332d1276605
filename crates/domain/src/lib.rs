//! Domain layer for the Perizinan backend.
//!
//! This crate contains:
//! - Domain models (license types, permit requests, notifications, email logs)
//! - The outbound mail transport abstraction

pub mod models;
pub mod services;
