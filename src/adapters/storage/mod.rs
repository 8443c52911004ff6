//! Storage Adapters
//!
//! Implementations of the CollectionStore port.
//!
//! ## Available Adapters
//!
//! - **JsonFileStore** - One pretty-printed JSON document per collection
//! - **InMemoryStore** - Keeps a collection in memory (testing/embedding)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileStores, InMemoryStore};
//!
//! // Production: the three collections under the configured data directory
//! let stores = FileStores::open(&config.storage);
//!
//! // Testing: in-memory users collection
//! let users: InMemoryStore<UserDirectory> = InMemoryStore::new();
//! ```

mod in_memory_store;
mod json_file_store;

pub use in_memory_store::InMemoryStore;
pub use json_file_store::JsonFileStore;

use std::sync::Arc;

use crate::config::StorageConfig;
use crate::domain::community::{GratitudeJournal, PostBoard};
use crate::domain::user::UserDirectory;

/// The three file-backed collections, each with its own lock and file.
#[derive(Debug, Clone)]
pub struct FileStores {
    pub users: Arc<JsonFileStore<UserDirectory>>,
    pub posts: Arc<JsonFileStore<PostBoard>>,
    pub gratitude: Arc<JsonFileStore<GratitudeJournal>>,
}

impl FileStores {
    pub fn open(config: &StorageConfig) -> Self {
        tracing::info!(data_dir = %config.data_dir.display(), "Opening collection stores");
        Self {
            users: Arc::new(JsonFileStore::new(config.users_path())),
            posts: Arc::new(JsonFileStore::new(config.posts_path())),
            gratitude: Arc::new(JsonFileStore::new(config.gratitude_path())),
        }
    }
}
