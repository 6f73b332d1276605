//! Attachment storage on the local filesystem.
//!
//! Uploaded files get a collision-resistant stored name; the original
//! name survives only as metadata and is never used as a path.

use std::path::Path;

use chrono::Utc;
use domain::models::NewAttachment;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Generates the on-disk name for an upload, keeping the extension of
/// the original name.
pub fn stored_file_name(original_name: &str) -> String {
    let extension = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default();

    format!("{}_{}{}", Uuid::new_v4(), Utc::now().timestamp(), extension)
}

/// Writes one uploaded file into the upload directory and returns its
/// attachment metadata.
pub async fn save_upload(
    upload_dir: &str,
    original_name: &str,
    mime_type: &str,
    data: &[u8],
) -> Result<NewAttachment, StorageError> {
    tokio::fs::create_dir_all(upload_dir).await?;

    let stored_name = stored_file_name(original_name);
    let path = Path::new(upload_dir).join(&stored_name);
    tokio::fs::write(&path, data).await?;

    Ok(NewAttachment {
        stored_name,
        original_name: original_name.to_string(),
        path: path.to_string_lossy().into_owned(),
        size_bytes: data.len() as i64,
        mime_type: mime_type.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_file_name_keeps_extension() {
        let name = stored_file_name("KTP Budi.PDF");
        assert!(name.ends_with(".pdf"));
        assert!(!name.contains(' '));
    }

    #[test]
    fn test_stored_file_name_without_extension() {
        let name = stored_file_name("berkas");
        assert!(!name.contains('.'));
    }

    #[test]
    fn test_stored_file_names_are_unique() {
        assert_ne!(stored_file_name("a.pdf"), stored_file_name("a.pdf"));
    }

    #[tokio::test]
    async fn test_save_upload_writes_file() {
        let dir = std::env::temp_dir().join(format!("uploads-{}", Uuid::new_v4()));
        let dir_str = dir.to_string_lossy().into_owned();

        let attachment = save_upload(&dir_str, "ktp.pdf", "application/pdf", b"%PDF-1.4")
            .await
            .unwrap();

        assert_eq!(attachment.original_name, "ktp.pdf");
        assert_eq!(attachment.size_bytes, 8);
        assert_eq!(attachment.mime_type, "application/pdf");
        let written = tokio::fs::read(&attachment.path).await.unwrap();
        assert_eq!(written, b"%PDF-1.4");

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
