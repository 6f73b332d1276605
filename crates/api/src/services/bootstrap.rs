//! First-run seeding: default super admin and license type catalog.
//!
//! Runs after migrations on startup and is idempotent: once the tables
//! have rows, it does nothing.

use domain::models::{AdminRole, CreateAdminRequest, CreateLicenseTypeRequest};
use persistence::repositories::{AdminRepository, LicenseTypeRepository};
use shared::password::{hash_password, PasswordError};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::config::BootstrapConfig;

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordError),
}

/// Seed the default super admin and license types if the database is
/// empty.
pub async fn bootstrap(pool: &PgPool, config: &BootstrapConfig) -> Result<(), BootstrapError> {
    bootstrap_admin(pool, config).await?;

    if config.seed_license_types {
        bootstrap_license_types(pool).await?;
    }

    Ok(())
}

async fn bootstrap_admin(pool: &PgPool, config: &BootstrapConfig) -> Result<(), BootstrapError> {
    let admins = AdminRepository::new(pool.clone());

    if admins.count().await? > 0 {
        return Ok(());
    }

    if config.admin_password.is_empty() {
        warn!(
            "No staff accounts exist and PERIZINAN__BOOTSTRAP__ADMIN_PASSWORD is empty - skipping admin bootstrap"
        );
        return Ok(());
    }

    let password_hash = hash_password(&config.admin_password)?;
    let admin = admins
        .insert(
            &CreateAdminRequest {
                username: config.admin_username.clone(),
                password: String::new(),
                email: config.admin_email.clone(),
                full_name: config.admin_full_name.clone(),
                role: AdminRole::SuperAdmin,
            },
            &password_hash,
        )
        .await?;

    info!(username = %admin.username, "Created bootstrap super admin");
    Ok(())
}

async fn bootstrap_license_types(pool: &PgPool) -> Result<(), BootstrapError> {
    let license_types = LicenseTypeRepository::new(pool.clone());

    if license_types.count().await? > 0 {
        return Ok(());
    }

    for (name, description, requirements) in default_license_types() {
        license_types
            .insert(&CreateLicenseTypeRequest {
                name: name.to_string(),
                description: description.to_string(),
                requirements: requirements.iter().map(|r| r.to_string()).collect(),
                is_active: true,
            })
            .await?;
    }

    info!("Seeded default license type catalog");
    Ok(())
}

fn default_license_types() -> Vec<(&'static str, &'static str, Vec<&'static str>)> {
    vec![
        (
            "Izin Praktik Dokter",
            "Surat izin praktik untuk dokter umum dan spesialis",
            vec!["KTP", "Ijazah dokter", "STR aktif", "Surat rekomendasi organisasi profesi"],
        ),
        (
            "Izin Praktik Bidan",
            "Surat izin praktik bidan",
            vec!["KTP", "Ijazah kebidanan", "STR aktif"],
        ),
        (
            "Izin Praktik Perawat",
            "Surat izin praktik perawat",
            vec!["KTP", "Ijazah keperawatan", "STR aktif"],
        ),
        (
            "Izin Apotek",
            "Izin operasional apotek",
            vec!["KTP pemilik", "SIPA apoteker", "Denah lokasi", "Daftar sarana"],
        ),
        (
            "Izin Klinik",
            "Izin operasional klinik",
            vec!["Akta pendirian", "Denah bangunan", "Daftar tenaga kesehatan", "Dokumen lingkungan"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_has_five_types() {
        let catalog = default_license_types();
        assert_eq!(catalog.len(), 5);
        for (name, _, requirements) in catalog {
            assert!(!name.is_empty());
            assert!(!requirements.is_empty());
        }
    }
}
