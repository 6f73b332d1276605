//! Database access layer: connection pooling, row entities and
//! sqlx-backed repositories for the licensing backend.

pub mod db;
pub mod entities;
pub mod repositories;

pub use db::{create_pool, DatabaseConfig};
