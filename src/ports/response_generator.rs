//! Response Generator Port - opaque text-completion service for chat replies.

use async_trait::async_trait;

use crate::domain::conversation::PromptContext;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors from a response generator.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GeneratorError {
    #[error("response generator unavailable: {0}")]
    Unavailable(String),

    #[error("invalid generator response: {0}")]
    InvalidResponse(String),

    #[error("response generator timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

impl From<GeneratorError> for DomainError {
    fn from(err: GeneratorError) -> Self {
        DomainError::new(ErrorCode::ResponseGeneratorUnavailable, err.to_string())
    }
}

/// Port for generating a supportive reply
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    /// Generate reply text for the given context
    ///
    /// The context always carries the current crisis level.
    ///
    /// # Errors
    /// Returns `GeneratorError` if generation fails
    async fn generate(&self, context: &PromptContext) -> Result<String, GeneratorError>;
}
