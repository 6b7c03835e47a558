//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the uploads directory and the parent of a file-backed store exist.
pub async fn ensure_env(upload_dir: &str, data_file: Option<&Path>) -> anyhow::Result<()> {
    if tokio::fs::metadata(upload_dir).await.is_err() {
        warn!(%upload_dir, "uploads directory not found; creating it");
    }
    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {upload_dir}: {e}"))?;

    if let Some(parent) = data_file.and_then(Path::parent).filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
        info!(data_dir = %parent.display(), "data directory ready");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_upload_and_data_dirs() -> anyhow::Result<()> {
        let root = std::env::temp_dir().join(format!("imgcrud_env_{}", uuid::Uuid::new_v4()));
        let uploads = root.join("uploads");
        let data_file = root.join("data").join("records.json");

        ensure_env(uploads.to_str().unwrap(), Some(&data_file)).await?;
        assert!(tokio::fs::metadata(&uploads).await?.is_dir());
        assert!(tokio::fs::metadata(root.join("data")).await?.is_dir());

        // idempotent
        ensure_env(uploads.to_str().unwrap(), None).await?;

        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }
}
