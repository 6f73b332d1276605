//! Domain services and external-collaborator abstractions.

pub mod mail;
