//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - JSON file and in-memory collection stores
//! - `ai` - Emotion classifier and response generator clients (HTTP, mock)
//! - `report` - Report document renderers

pub mod ai;
pub mod report;
pub mod storage;

pub use ai::{HttpEmotionClassifier, HttpResponseGenerator, MockEmotionClassifier, MockResponseGenerator};
pub use report::MarkdownReportRenderer;
pub use storage::{FileStores, InMemoryStore, JsonFileStore};
