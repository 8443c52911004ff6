//! Mock emotion classifier for testing.
//!
//! Responses are queued and consumed in order; once the queue is empty the
//! classifier answers with a single confident `neutral`.
//!
//! # Example
//!
//! ```ignore
//! let classifier = MockEmotionClassifier::new()
//!     .with_predictions(vec![("sadness", 0.7), ("grief", 0.2)])
//!     .with_error(ClassifierError::Unavailable("down".into()));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::ports::{Classification, ClassifierError, EmotionClassifier};

#[derive(Debug, Clone)]
enum MockClassification {
    Success(Vec<Classification>),
    Error(ClassifierError),
}

/// A recorded `classify` call.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifyCall {
    pub text: String,
    pub top_k: usize,
}

#[derive(Debug, Clone, Default)]
pub struct MockEmotionClassifier {
    responses: Arc<Mutex<VecDeque<MockClassification>>>,
    calls: Arc<Mutex<Vec<ClassifyCall>>>,
}

impl MockEmotionClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    pub fn with_predictions<L: Into<String>>(self, predictions: Vec<(L, f64)>) -> Self {
        let predictions = predictions
            .into_iter()
            .map(|(label, confidence)| Classification::new(label, confidence))
            .collect();
        self.push(MockClassification::Success(predictions));
        self
    }

    /// Queues an error response.
    pub fn with_error(self, error: ClassifierError) -> Self {
        self.push(MockClassification::Error(error));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn get_calls(&self) -> Vec<ClassifyCall> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn push(&self, response: MockClassification) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
    }

    fn next_response(&self) -> MockClassification {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| {
                MockClassification::Success(vec![Classification::new("neutral", 0.9)])
            })
    }
}

#[async_trait]
impl EmotionClassifier for MockEmotionClassifier {
    async fn classify(&self, text: &str, top_k: usize) -> Result<Vec<Classification>, ClassifierError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ClassifyCall {
                text: text.to_string(),
                top_k,
            });

        match self.next_response() {
            MockClassification::Success(mut predictions) => {
                predictions.truncate(top_k);
                Ok(predictions)
            }
            MockClassification::Error(error) => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn responses_are_consumed_in_order() {
        let classifier = MockEmotionClassifier::new()
            .with_predictions(vec![("joy", 0.8)])
            .with_error(ClassifierError::Timeout { timeout_secs: 1 });

        assert_eq!(classifier.classify("a", 5).await.unwrap()[0].label, "joy");
        assert!(classifier.classify("b", 5).await.is_err());
        assert_eq!(classifier.classify("c", 5).await.unwrap()[0].label, "neutral");
        assert_eq!(classifier.call_count(), 3);
    }

    #[tokio::test]
    async fn truncates_to_top_k_and_records_calls() {
        let classifier =
            MockEmotionClassifier::new().with_predictions(vec![("fear", 0.5), ("sadness", 0.3)]);
        let result = classifier.classify("scared", 1).await.unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(
            classifier.get_calls(),
            vec![ClassifyCall {
                text: "scared".to_string(),
                top_k: 1
            }]
        );
    }
}
