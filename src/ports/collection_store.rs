//! Collection Store Port - durable storage for a whole persisted collection.
//!
//! Each collection (users, community posts, gratitude journal) is read and
//! written as one document. Mutations go through [`CollectionStore::update`],
//! which serializes read-modify-write cycles on the same collection.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors that can occur during collection storage operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to serialize collection: {0}")]
    SerializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    /// The mutation rejected the change; nothing was written.
    #[error(transparent)]
    Aborted(#[from] DomainError),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Aborted(inner) => inner,
            other => DomainError::new(ErrorCode::StorageError, other.to_string()),
        }
    }
}

/// Record of a corrupt document that was moved aside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recovery {
    /// Where the unreadable document now lives.
    pub quarantined_to: Option<PathBuf>,
    /// Parser message describing the corruption.
    pub reason: String,
}

/// Result of loading a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub value: T,
    /// Present when the persisted document was corrupt and replaced by an empty one.
    pub recovered: Option<Recovery>,
}

impl<T> Loaded<T> {
    pub fn clean(value: T) -> Self {
        Self {
            value,
            recovered: None,
        }
    }

    /// Recoverable `StorageCorrupted` warning for callers to surface.
    pub fn warning(&self) -> Option<DomainError> {
        self.recovered.as_ref().map(|r| {
            let err = DomainError::new(
                ErrorCode::StorageCorrupted,
                "Stored data was unreadable and has been reset",
            )
            .with_detail("reason", r.reason.clone());
            match &r.quarantined_to {
                Some(path) => err.with_detail("quarantined_to", path.display().to_string()),
                None => err,
            }
        })
    }
}

/// A change applied to a loaded collection inside [`CollectionStore::update`].
///
/// Returning an error aborts the update without writing.
pub type Mutation<'a, T> = Box<dyn FnOnce(&mut T) -> Result<(), DomainError> + Send + 'a>;

/// Port for loading and atomically mutating a persisted collection
#[async_trait]
pub trait CollectionStore<T>: Send + Sync
where
    T: Send + Sync + 'static,
{
    /// Load the whole collection
    ///
    /// Missing data yields an empty collection. Corrupt data is quarantined
    /// and reported through [`Loaded::recovered`] instead of an error.
    ///
    /// # Errors
    /// Returns `StoreError::IoError` if the underlying medium fails
    async fn load(&self) -> Result<Loaded<T>, StoreError>;

    /// Replace the whole collection
    ///
    /// # Errors
    /// Returns `StoreError` if serialization or the write fails
    async fn save(&self, value: &T) -> Result<(), StoreError>;

    /// Load, apply `mutation`, and persist, holding the collection's write lock
    /// for the whole cycle
    ///
    /// # Errors
    /// Returns `StoreError::Aborted` if the mutation fails; storage errors otherwise
    async fn update(&self, mutation: Mutation<'_, T>) -> Result<(), StoreError>;
}

/// Typed convenience layer over [`CollectionStore::update`].
#[async_trait]
pub trait CollectionStoreExt<T>: CollectionStore<T>
where
    T: Send + Sync + 'static,
{
    /// Runs `f` inside an atomic update and returns its result.
    async fn with_collection<R, F>(&self, f: F) -> Result<R, DomainError>
    where
        R: Send,
        F: FnOnce(&mut T) -> Result<R, DomainError> + Send;
}

#[async_trait]
impl<S, T> CollectionStoreExt<T> for S
where
    S: CollectionStore<T> + ?Sized,
    T: Send + Sync + 'static,
{
    async fn with_collection<R, F>(&self, f: F) -> Result<R, DomainError>
    where
        R: Send,
        F: FnOnce(&mut T) -> Result<R, DomainError> + Send,
    {
        let mut output = None;
        let slot = &mut output;
        self.update(Box::new(move |value: &mut T| {
            *slot = Some(f(value)?);
            Ok(())
        }))
        .await?;
        output.ok_or_else(|| {
            DomainError::new(ErrorCode::InternalError, "Collection update produced no result")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aborted_store_error_unwraps_to_inner_domain_error() {
        let inner = DomainError::user_not_found("river");
        let err: DomainError = StoreError::Aborted(inner.clone()).into();
        assert_eq!(err, inner);
    }

    #[test]
    fn io_error_maps_to_storage_error() {
        let err: DomainError = StoreError::IoError("disk full".to_string()).into();
        assert_eq!(err.code(), ErrorCode::StorageError);
        assert!(err.message().contains("disk full"));
    }

    #[test]
    fn clean_load_has_no_warning() {
        assert!(Loaded::clean(0u32).warning().is_none());
    }

    #[test]
    fn recovered_load_warns_with_quarantine_path() {
        let loaded = Loaded {
            value: 0u32,
            recovered: Some(Recovery {
                quarantined_to: Some(PathBuf::from("/data/users_backup_x.json")),
                reason: "expected value".to_string(),
            }),
        };
        let warning = loaded.warning().unwrap();
        assert_eq!(warning.code(), ErrorCode::StorageCorrupted);
        assert_eq!(
            warning.details.get("quarantined_to"),
            Some(&"/data/users_backup_x.json".to_string())
        );
    }
}
