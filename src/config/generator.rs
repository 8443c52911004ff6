//! Response generator configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::classifier::is_http_url;
use super::error::ValidationError;

/// Chat response generator endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    /// Completion endpoint; `None` leaves the generator to be wired by the embedder
    pub endpoint: Option<String>,

    /// Bearer token for the completion endpoint
    pub api_token: Option<Secret<String>>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl GeneratorConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.as_ref().is_some_and(|e| !e.is_empty())
    }

    /// Validate generator configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        match &self.endpoint {
            Some(endpoint) if !is_http_url(endpoint) => {
                Err(ValidationError::InvalidEndpoint("generator"))
            }
            _ => Ok(()),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_token: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    60
}
