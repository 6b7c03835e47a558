use std::{path::PathBuf, sync::Arc};
use tokio::{fs, sync::RwLock};

use crate::errors::ServiceError;

/// A document that can be addressed by a key inside a [`JsonCollection`].
pub trait Keyed {
    type Key: PartialEq;

    fn key(&self) -> &Self::Key;
}

impl Keyed for models::record::Model {
    type Key = uuid::Uuid;

    fn key(&self) -> &uuid::Uuid { &self.id }
}

/// JSON file-backed ordered collection.
///
/// Persists a `Vec<V>` to a JSON file, keeping insertion order, and rewrites
/// the whole file after every mutation. Each mutation holds the write lock
/// until the file is written, so single-document writes are atomic within
/// the process.
pub struct JsonCollection<V> {
    inner: RwLock<Vec<V>>,
    file_path: PathBuf,
}

impl<V> JsonCollection<V>
where
    V: Keyed + serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Initialize the collection from a path. Creates the file with an empty array if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let docs: Vec<V> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| ServiceError::Db(e.to_string()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                fs::write(&file_path, b"[]").await?;
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Arc::new(Self { inner: RwLock::new(docs), file_path }))
    }

    async fn persist(&self, docs: &[V]) -> Result<(), ServiceError> {
        let data = serde_json::to_vec(docs).map_err(|e| ServiceError::Db(e.to_string()))?;
        fs::write(&self.file_path, data).await?;
        Ok(())
    }

    /// All documents in insertion order.
    pub async fn list(&self) -> Vec<V> {
        self.inner.read().await.clone()
    }

    pub async fn get(&self, key: &V::Key) -> Option<V> {
        let docs = self.inner.read().await;
        docs.iter().find(|d| d.key() == key).cloned()
    }

    /// Append a document and persist.
    pub async fn insert(&self, doc: V) -> Result<V, ServiceError> {
        let mut docs = self.inner.write().await;
        docs.push(doc.clone());
        if let Err(e) = self.persist(&docs).await {
            docs.pop();
            return Err(e);
        }
        Ok(doc)
    }

    /// Replace the document with the same key in place. `Ok(None)` if it no longer exists.
    pub async fn replace(&self, doc: V) -> Result<Option<V>, ServiceError> {
        let mut docs = self.inner.write().await;
        let Some(pos) = docs.iter().position(|d| d.key() == doc.key()) else {
            return Ok(None);
        };
        let previous = std::mem::replace(&mut docs[pos], doc.clone());
        if let Err(e) = self.persist(&docs).await {
            docs[pos] = previous;
            return Err(e);
        }
        Ok(Some(doc))
    }

    /// Remove by key and persist; returns whether it existed.
    pub async fn remove(&self, key: &V::Key) -> Result<bool, ServiceError> {
        let mut docs = self.inner.write().await;
        let Some(pos) = docs.iter().position(|d| d.key() == key) else {
            return Ok(false);
        };
        let removed = docs.remove(pos);
        if let Err(e) = self.persist(&docs).await {
            docs.insert(pos, removed);
            return Err(e);
        }
        Ok(true)
    }
}
