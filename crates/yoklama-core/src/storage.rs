//! Key-value document store.
//!
//! Persisted state (academic settings, the course catalog) is kept as one
//! serialized JSON document per named key. The [`KeyValueStore`] trait lets
//! the service swap the on-disk [`FileStore`] for the in-memory
//! [`MemoryStore`] in tests without touching business logic.
//!
//! # Example
//!
//! ```ignore
//! use yoklama_core::storage::{FileStore, KeyValueStore};
//!
//! let store = FileStore::new("./storage/data");
//! store.put_json("academicSettings", &settings).await?;
//! let loaded: Option<AcademicSettings> = store.get_json("academicSettings").await?;
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use tokio::sync::RwLock;

/// Errors raised by store backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored document '{key}' is not valid JSON: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize document '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Abstract key-value document store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the raw document stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous document.
    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes the document under `key`. Missing keys are not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Typed JSON helpers on top of any [`KeyValueStore`].
#[async_trait]
pub trait JsonStoreExt: KeyValueStore {
    async fn get_json<T>(&self, key: &str) -> Result<Option<T>, StorageError>
    where
        T: DeserializeOwned + Send,
    {
        match self.get(key).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StorageError::Corrupt {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    async fn put_json<T>(&self, key: &str, value: &T) -> Result<(), StorageError>
    where
        T: Serialize + Sync,
    {
        let raw =
            serde_json::to_string_pretty(value).map_err(|source| StorageError::Serialize {
                key: key.to_string(),
                source,
            })?;
        self.put(key, &raw).await
    }
}

impl<S: KeyValueStore + ?Sized> JsonStoreExt for S {}

/// Rejects keys that could escape the storage directory.
fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty()
        || !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(StorageError::InvalidKey(format!(
            "'{}' must be non-empty and contain only letters, digits, '-' or '_'",
            key
        )));
    }
    Ok(())
}

/// Filesystem store: one `<key>.json` file per key inside `base_dir`.
///
/// Writes go to a temporary sibling file first and are renamed into place,
/// so readers never observe a half-written document.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.base_dir.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.base_dir).await?;

        let tmp = self.base_dir.join(format!(".{}.json.tmp", key));
        fs::write(&tmp, value).await?;
        fs::rename(&tmp, &path).await?;

        tracing::debug!(key, path = %path.display(), "Stored document");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store used by tests and ephemeral deployments.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.documents.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.documents
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.documents.write().await.remove(key);
        Ok(())
    }
}
