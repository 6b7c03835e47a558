//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime::ensure_env` without depending directly on `common`.

use std::path::Path;

/// Ensure the uploads directory (and a JSON store's parent directory) exist.
pub async fn ensure_env(upload_dir: &str, data_file: Option<&Path>) -> anyhow::Result<()> {
    common::env::ensure_env(upload_dir, data_file).await
}
