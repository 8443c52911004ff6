//! In-Memory Collection Store
//!
//! Keeps a collection in memory.
//! Useful for testing and for embedding the engine without a data directory.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{CollectionStore, Loaded, Mutation, StoreError};

/// In-memory storage for a single collection
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore<T> {
    value: Arc<RwLock<T>>,
}

impl<T> InMemoryStore<T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            value: Arc::new(RwLock::new(T::default())),
        }
    }

    /// Create a store pre-populated with `value`
    pub fn with_value(value: T) -> Self {
        Self {
            value: Arc::new(RwLock::new(value)),
        }
    }

    /// Current contents (useful for assertions)
    pub async fn snapshot(&self) -> T {
        self.value.read().await.clone()
    }
}

#[async_trait]
impl<T> CollectionStore<T> for InMemoryStore<T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    async fn load(&self) -> Result<Loaded<T>, StoreError> {
        Ok(Loaded::clean(self.value.read().await.clone()))
    }

    async fn save(&self, value: &T) -> Result<(), StoreError> {
        *self.value.write().await = value.clone();
        Ok(())
    }

    async fn update(&self, mutation: Mutation<'_, T>) -> Result<(), StoreError> {
        let mut guard = self.value.write().await;
        let mut draft = guard.clone();
        mutation(&mut draft)?;
        *guard = draft;
        Ok(())
    }
}
