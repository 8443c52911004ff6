//! Emotion Classifier Port - opaque text classifier.
//!
//! The classifier returns ranked `{label, confidence}` pairs. Mapping labels
//! to risk tiers happens in the domain, not in adapters.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode};

/// One raw classifier output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: String,
    pub confidence: f64,
}

impl Classification {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// Errors from an emotion classifier.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClassifierError {
    /// Classifier could not be reached or refused the request.
    #[error("classifier unavailable: {0}")]
    Unavailable(String),

    /// Response could not be interpreted.
    #[error("invalid classifier response: {0}")]
    InvalidResponse(String),

    /// Request timed out.
    #[error("classifier timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

impl From<ClassifierError> for DomainError {
    fn from(err: ClassifierError) -> Self {
        DomainError::new(ErrorCode::ClassifierUnavailable, err.to_string())
    }
}

/// Port for classifying free text into emotions
#[async_trait]
pub trait EmotionClassifier: Send + Sync {
    /// Classify `text`, returning up to `top_k` predictions
    ///
    /// Results need not be sorted; callers rank them.
    ///
    /// # Errors
    /// Returns `ClassifierError` if the classifier fails
    async fn classify(&self, text: &str, top_k: usize) -> Result<Vec<Classification>, ClassifierError>;
}
