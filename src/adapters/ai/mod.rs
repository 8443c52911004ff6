//! AI Collaborator Adapters.
//!
//! Implementations of the EmotionClassifier and ResponseGenerator ports.
//!
//! ## Available Adapters
//!
//! - `HttpEmotionClassifier` - Hosted text-classification endpoint
//! - `HttpResponseGenerator` - Hosted chat completion endpoint
//! - `MockEmotionClassifier` / `MockResponseGenerator` - Configurable mocks for testing

mod http_classifier;
mod http_generator;
mod mock_classifier;
mod mock_generator;

pub use http_classifier::{HttpClassifierConfig, HttpEmotionClassifier};
pub use http_generator::{HttpGeneratorConfig, HttpResponseGenerator};
pub use mock_classifier::{ClassifyCall, MockEmotionClassifier};
pub use mock_generator::MockResponseGenerator;
