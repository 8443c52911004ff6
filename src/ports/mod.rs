//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `CollectionStore` - Whole-collection load/save with atomic updates
//! - `UserStore` - Per-user operations layered over the users collection
//!
//! ## Collaborator Ports
//!
//! - `EmotionClassifier` - Ranked emotion predictions for free text
//! - `ResponseGenerator` - Supportive chat reply generation
//! - `ReportRenderer` - Report snapshot to document bytes

mod collection_store;
mod emotion_classifier;
mod report_renderer;
mod response_generator;
mod user_store;

pub use collection_store::{
    CollectionStore, CollectionStoreExt, Loaded, Mutation, Recovery, StoreError,
};
pub use emotion_classifier::{Classification, ClassifierError, EmotionClassifier};
pub use report_renderer::{RenderError, ReportRenderer};
pub use response_generator::{GeneratorError, ResponseGenerator};
pub use user_store::UserStore;
