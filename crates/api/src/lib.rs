//! HTTP API for the health-department licensing backend.
//!
//! Exposed as a library so integration tests can build the router
//! without starting a process.

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod services;
