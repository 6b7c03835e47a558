#![cfg(test)]
use std::{path::PathBuf, sync::Arc};

use crate::record::{JsonRecordRepository, RecordService};

/// Removes the temp directory backing a test store when dropped.
pub struct TempDirGuard(pub PathBuf);

impl Drop for TempDirGuard {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

/// Record service over a fresh JSON file in its own temp directory.
pub async fn temp_json_service() -> Result<(RecordService, TempDirGuard), anyhow::Error> {
    let dir = std::env::temp_dir().join(format!("record_service_{}", uuid::Uuid::new_v4()));
    let repo = JsonRecordRepository::open(dir.join("records.json")).await?;
    Ok((RecordService::new(Arc::new(repo)), TempDirGuard(dir)))
}
