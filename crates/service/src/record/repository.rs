use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::storage::json_collection::JsonCollection;
use super::Record;

/// Storage collection for records. Implementations provide per-document
/// atomicity only; there is no cross-request transaction.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// All records in insertion order.
    async fn list(&self) -> Result<Vec<Record>, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<Record>, ServiceError>;
    async fn insert(&self, record: Record) -> Result<Record, ServiceError>;
    /// Persist an existing record; `Ok(None)` if it was removed meanwhile.
    async fn save(&self, record: Record) -> Result<Option<Record>, ServiceError>;
    /// Returns whether a record was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmRecordRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl RecordRepository for SeaOrmRecordRepository {
    async fn list(&self) -> Result<Vec<Record>, ServiceError> {
        Ok(models::record::list(&self.db).await?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Record>, ServiceError> {
        Ok(models::record::find(&self.db, id).await?)
    }

    async fn insert(&self, record: Record) -> Result<Record, ServiceError> {
        Ok(models::record::insert(&self.db, record).await?)
    }

    async fn save(&self, record: Record) -> Result<Option<Record>, ServiceError> {
        Ok(models::record::save(&self.db, record).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(models::record::delete(&self.db, id).await?)
    }
}

/// JSON file-backed repository implementation.
#[derive(Clone)]
pub struct JsonRecordRepository {
    store: Arc<JsonCollection<Record>>,
}

impl JsonRecordRepository {
    /// Open (or create) the collection file.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let store = JsonCollection::<Record>::new(path).await?;
        Ok(Self { store })
    }
}

#[async_trait]
impl RecordRepository for JsonRecordRepository {
    async fn list(&self) -> Result<Vec<Record>, ServiceError> {
        Ok(self.store.list().await)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Record>, ServiceError> {
        Ok(self.store.get(&id).await)
    }

    async fn insert(&self, record: Record) -> Result<Record, ServiceError> {
        self.store.insert(record).await
    }

    async fn save(&self, record: Record) -> Result<Option<Record>, ServiceError> {
        self.store.replace(record).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        self.store.remove(&id).await
    }
}
