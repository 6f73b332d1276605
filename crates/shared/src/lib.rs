//! Shared utilities and common types for the Perizinan backend.
//!
//! This crate provides common functionality used across all other crates:
//! - JWT token generation and validation with typed claims
//! - Password hashing with Argon2id
//! - Offset pagination helpers
//! - Common validation logic

pub mod jwt;
pub mod pagination;
pub mod password;
pub mod validation;
