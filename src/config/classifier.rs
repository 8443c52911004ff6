//! Emotion classifier configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Emotion classifier endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    /// Inference endpoint; `None` leaves the classifier to be wired by the embedder
    pub endpoint: Option<String>,

    /// Bearer token for the inference endpoint
    pub api_token: Option<Secret<String>>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Predictions kept for direct analysis
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Predictions kept for chat messages
    #[serde(default = "default_chat_top_k")]
    pub chat_top_k: usize,
}

impl ClassifierConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an endpoint is configured
    pub fn is_configured(&self) -> bool {
        self.endpoint.as_ref().is_some_and(|e| !e.is_empty())
    }

    /// Validate classifier configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.top_k == 0 {
            return Err(ValidationError::InvalidTopK("classifier.top_k"));
        }
        if self.chat_top_k == 0 {
            return Err(ValidationError::InvalidTopK("classifier.chat_top_k"));
        }
        if let Some(endpoint) = &self.endpoint {
            if !is_http_url(endpoint) {
                return Err(ValidationError::InvalidEndpoint("classifier"));
            }
        }
        Ok(())
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_token: None,
            timeout_secs: default_timeout(),
            top_k: default_top_k(),
            chat_top_k: default_chat_top_k(),
        }
    }
}

pub(super) fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

fn default_timeout() -> u64 {
    30
}

fn default_top_k() -> usize {
    5
}

fn default_chat_top_k() -> usize {
    3
}
