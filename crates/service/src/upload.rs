//! Upload sink: writes one attached file per request into a flat directory.
//!
//! Files are named `<field>-<epoch millis><original extension>` and never
//! overwritten or removed by the service. Two uploads for the same field in
//! the same millisecond would collide; no detection is attempted.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::fs;
use tracing::info;

use crate::errors::ServiceError;

/// Public URL prefix under which the upload directory is served.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// A file that has been written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    pub file_name: String,
    pub path: PathBuf,
    /// Value stored in a record's `imageUrl`.
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct UploadSink {
    dir: PathBuf,
}

/// `<field>-<millis><ext>`, where `ext` keeps its leading dot and is empty
/// when the original name has no extension.
pub fn file_name_for(field_name: &str, original_name: &str, epoch_millis: i64) -> String {
    let ext = Path::new(original_name)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    format!("{field_name}-{epoch_millis}{ext}")
}

impl UploadSink {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `bytes` under a generated name and return where it landed.
    pub async fn store(&self, field_name: &str, original_name: &str, bytes: &[u8]) -> Result<StoredUpload, ServiceError> {
        let file_name = file_name_for(field_name, original_name, Utc::now().timestamp_millis());
        let path = self.dir.join(&file_name);
        fs::write(&path, bytes).await?;
        let url = format!("{PUBLIC_PREFIX}/{file_name}");
        info!(%file_name, size = bytes.len(), "upload_stored");
        Ok(StoredUpload { file_name, path, url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_keeps_last_extension() {
        assert_eq!(file_name_for("image", "photo.jpg", 1700000000123), "image-1700000000123.jpg");
        assert_eq!(file_name_for("image", "archive.tar.gz", 5), "image-5.gz");
        assert_eq!(file_name_for("image", "README", 5), "image-5");
        assert_eq!(file_name_for("image", ".bashrc", 5), "image-5");
    }

    #[test]
    fn file_name_ignores_directories_in_original_name() {
        assert_eq!(file_name_for("image", "../../etc/cat.png", 7), "image-7.png");
    }

    #[tokio::test]
    async fn store_writes_bytes_and_returns_public_url() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("upload_sink_{}", uuid::Uuid::new_v4()));
        tokio::fs::create_dir_all(&dir).await?;
        let sink = UploadSink::new(&dir);

        let stored = sink.store("image", "cat.png", b"\x89PNG").await?;
        assert!(stored.file_name.starts_with("image-"));
        assert!(stored.file_name.ends_with(".png"));
        assert_eq!(stored.url, format!("/uploads/{}", stored.file_name));
        assert_eq!(tokio::fs::read(&stored.path).await?, b"\x89PNG");

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn store_into_missing_dir_is_io_error() {
        let sink = UploadSink::new(std::env::temp_dir().join(format!("missing_{}", uuid::Uuid::new_v4())).join("nested"));
        let err = sink.store("image", "a.png", b"x").await.unwrap_err();
        assert!(matches!(err, ServiceError::Io(_)));
    }
}
