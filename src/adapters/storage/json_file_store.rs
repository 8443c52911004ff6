//! JSON file collection store
//!
//! Persists one collection as a single pretty-printed JSON document.
//! Writes go to a temporary sibling and are renamed into place, so readers
//! never see a partially written document and reads need no lock.

use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::ports::{CollectionStore, Loaded, Mutation, Recovery, StoreError};

/// File-backed store for a single collection
#[derive(Debug)]
pub struct JsonFileStore<T> {
    path: PathBuf,
    /// Serializes read-modify-write cycles and quarantines.
    write_lock: Mutex<()>,
    _collection: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Default + Send + Sync + 'static,
{
    /// Create a store for the document at `path`
    ///
    /// Nothing is touched on disk until the first write.
    ///
    /// # Example
    /// ```ignore
    /// let users: JsonFileStore<UserDirectory> = JsonFileStore::new("./data/users.json");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
            _collection: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let ext = self
            .path
            .extension()
            .map(|e| format!("{}.tmp", e.to_string_lossy()))
            .unwrap_or_else(|| "tmp".to_string());
        self.path.with_extension(ext)
    }

    /// `{stem}_backup_{YYYYmmdd_HHMMSS_mmm}.{ext}` beside the collection file.
    fn quarantine_path(&self) -> PathBuf {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "collection".to_string());
        let stamp = Utc::now().format("%Y%m%d_%H%M%S_%3f");
        let name = match self.path.extension() {
            Some(ext) => format!("{}_backup_{}.{}", stem, stamp, ext.to_string_lossy()),
            None => format!("{}_backup_{}", stem, stamp),
        };
        self.path.with_file_name(name)
    }

    /// Reads and parses the document.
    ///
    /// The inner `Err` carries the parse failure of a corrupt document.
    async fn read_document(&self) -> Result<Result<T, String>, StoreError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Ok(T::default())),
            Err(e) => {
                return Err(StoreError::IoError(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };
        Ok(serde_json::from_slice(&bytes).map_err(|e| e.to_string()))
    }

    /// Loads the document, quarantining it if corrupt. Caller holds the write lock.
    async fn load_locked(&self) -> Result<Loaded<T>, StoreError> {
        match self.read_document().await? {
            Ok(value) => Ok(Loaded::clean(value)),
            Err(reason) => self.quarantine(reason).await,
        }
    }

    async fn quarantine(&self, reason: String) -> Result<Loaded<T>, StoreError> {
        let backup = self.quarantine_path();
        let quarantined_to = match fs::rename(&self.path, &backup).await {
            Ok(()) => Some(backup),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                return Err(StoreError::IoError(format!(
                    "Failed to quarantine {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        tracing::warn!(
            path = %self.path.display(),
            quarantined_to = ?quarantined_to,
            reason = %reason,
            "Stored collection was corrupt; starting fresh"
        );

        Ok(Loaded {
            value: T::default(),
            recovered: Some(Recovery {
                quarantined_to,
                reason,
            }),
        })
    }

    async fn write_document(&self, value: &T) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| StoreError::IoError(format!("Failed to create directory: {}", e)))?;
            }
        }

        let json = serde_json::to_vec_pretty(value)
            .map_err(|e| StoreError::SerializationFailed(e.to_string()))?;

        let temp_path = self.temp_path();
        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| StoreError::IoError(format!("Failed to create temp file: {}", e)))?;
        file.write_all(&json)
            .await
            .map_err(|e| StoreError::IoError(format!("Failed to write temp file: {}", e)))?;
        file.sync_all()
            .await
            .map_err(|e| StoreError::IoError(format!("Failed to sync temp file: {}", e)))?;
        drop(file);

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| StoreError::IoError(format!("Failed to rename file: {}", e)))?;

        tracing::debug!(path = %self.path.display(), bytes = json.len(), "Collection saved");
        Ok(())
    }
}

#[async_trait]
impl<T> CollectionStore<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Default + Send + Sync + 'static,
{
    async fn load(&self) -> Result<Loaded<T>, StoreError> {
        match self.read_document().await? {
            Ok(value) => Ok(Loaded::clean(value)),
            Err(_) => {
                // A writer may have replaced the document since the read.
                let _guard = self.write_lock.lock().await;
                self.load_locked().await
            }
        }
    }

    async fn save(&self, value: &T) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        self.write_document(value).await
    }

    async fn update(&self, mutation: Mutation<'_, T>) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let Loaded { mut value, .. } = self.load_locked().await?;
        mutation(&mut value)?;
        self.write_document(&value).await
    }
}
