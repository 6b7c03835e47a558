use std::sync::Arc;
use uuid::Uuid;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use super::{Record, RecordFields, RecordRepository};

/// Application service for the five record operations.
/// Ids arrive as raw path strings; anything that is not a UUID is an
/// `InvalidId` (an internal error), never a not-found.
#[derive(Clone)]
pub struct RecordService {
    repo: Arc<dyn RecordRepository>,
}

fn parse_id(id: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(id).map_err(|e| ServiceError::InvalidId(format!("{id}: {e}")))
}

impl RecordService {
    pub fn new(repo: Arc<dyn RecordRepository>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<Record>, ServiceError> {
        let records = self.repo.list().await?;
        info!(count = records.len(), "list records");
        Ok(records)
    }

    pub async fn get(&self, id: &str) -> Result<Record, ServiceError> {
        let id = parse_id(id)?;
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("record"))
    }

    /// `image_url` is the public path of an already stored upload, if any.
    #[instrument(skip(self, fields))]
    pub async fn create(&self, fields: RecordFields, image_url: Option<String>) -> Result<Record, ServiceError> {
        let created = self.repo.insert(Record::new(fields, image_url)).await?;
        info!(id = %created.id, has_image = !created.image_url.is_empty(), "record_created");
        Ok(created)
    }

    /// Overwrite all text fields; replace the image only when `image_url` is given.
    #[instrument(skip(self, fields))]
    pub async fn update(&self, id: &str, fields: RecordFields, image_url: Option<String>) -> Result<Record, ServiceError> {
        let mut record = self.get(id).await?;
        record.apply(fields, image_url);
        let saved = self
            .repo
            .save(record)
            .await?
            .ok_or_else(|| ServiceError::not_found("record"))?;
        info!(id = %saved.id, "record_updated");
        Ok(saved)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let uuid = parse_id(id)?;
        if !self.repo.delete(uuid).await? {
            return Err(ServiceError::not_found("record"));
        }
        info!(id = %uuid, "record_deleted");
        Ok(())
    }
}
