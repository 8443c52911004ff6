//! Mock response generator for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::conversation::PromptContext;
use crate::ports::{GeneratorError, ResponseGenerator};

#[derive(Debug, Clone)]
enum MockReply {
    Success(String),
    Error(GeneratorError),
}

/// Queued replies; records every prompt context it receives.
#[derive(Debug, Clone, Default)]
pub struct MockResponseGenerator {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    calls: Arc<Mutex<Vec<PromptContext>>>,
}

impl MockResponseGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.push(MockReply::Success(reply.into()));
        self
    }

    pub fn with_error(self, error: GeneratorError) -> Self {
        self.push(MockReply::Error(error));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Prompt contexts received so far.
    pub fn get_calls(&self) -> Vec<PromptContext> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn push(&self, reply: MockReply) {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(reply);
    }
}

#[async_trait]
impl ResponseGenerator for MockResponseGenerator {
    async fn generate(&self, context: &PromptContext) -> Result<String, GeneratorError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(context.clone());

        let next = self
            .replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        match next {
            Some(MockReply::Success(reply)) => Ok(reply),
            Some(MockReply::Error(error)) => Err(error),
            None => Ok(format!(
                "I hear that you're feeling {}. Thank you for sharing that with me.",
                context.dominant_emotion
            )),
        }
    }
}
