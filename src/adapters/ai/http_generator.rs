//! HTTP response generator.
//!
//! Posts the rendered prompt as `{"message": "..."}` and accepts either a bare
//! JSON string or `{"response": "..."}` back.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::GeneratorConfig;
use crate::domain::conversation::PromptContext;
use crate::ports::{GeneratorError, ResponseGenerator};

/// Configuration for the HTTP generator.
#[derive(Debug, Clone)]
pub struct HttpGeneratorConfig {
    pub endpoint: String,
    pub api_token: Option<Secret<String>>,
    pub timeout: Duration,
}

impl HttpGeneratorConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_token: None,
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(Secret::new(token.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds from application config; `None` when no endpoint is set.
    pub fn from_app_config(config: &GeneratorConfig) -> Option<Self> {
        let endpoint = config.endpoint.as_ref().filter(|e| !e.is_empty())?;
        Some(Self {
            endpoint: endpoint.clone(),
            api_token: config.api_token.clone(),
            timeout: config.timeout(),
        })
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GenerateResponse {
    Text(String),
    Wrapped { response: String },
}

fn parse_reply(body: &str) -> Result<String, GeneratorError> {
    let reply = match serde_json::from_str::<GenerateResponse>(body)
        .map_err(|e| GeneratorError::InvalidResponse(e.to_string()))?
    {
        GenerateResponse::Text(text) => text,
        GenerateResponse::Wrapped { response } => response,
    };

    let reply = reply.trim();
    if reply.is_empty() {
        return Err(GeneratorError::InvalidResponse("empty reply".to_string()));
    }
    Ok(reply.to_string())
}

/// Response generator backed by an HTTP completion endpoint.
#[derive(Debug, Clone)]
pub struct HttpResponseGenerator {
    config: HttpGeneratorConfig,
    client: Client,
}

impl HttpResponseGenerator {
    /// # Errors
    /// Returns `GeneratorError::Unavailable` if the HTTP client cannot be built
    pub fn new(config: HttpGeneratorConfig) -> Result<Self, GeneratorError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GeneratorError::Unavailable(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    async fn send_request(&self, request: &GenerateRequest) -> Result<Response, GeneratorError> {
        let mut builder = self.client.post(&self.config.endpoint).json(request);
        if let Some(token) = &self.config.api_token {
            builder = builder.header("Authorization", format!("Bearer {}", token.expose_secret()));
        }

        builder.send().await.map_err(|e| {
            if e.is_timeout() {
                GeneratorError::Timeout {
                    timeout_secs: self.config.timeout.as_secs(),
                }
            } else if e.is_connect() {
                GeneratorError::Unavailable(format!("Connection failed: {}", e))
            } else {
                GeneratorError::Unavailable(e.to_string())
            }
        })
    }

    async fn handle_response_status(&self, response: Response) -> Result<Response, GeneratorError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 | 403 => Err(GeneratorError::Unavailable(
                "Generator rejected credentials".to_string(),
            )),
            429 => Err(GeneratorError::Unavailable("Generator rate limited".to_string())),
            500..=599 => Err(GeneratorError::Unavailable(format!(
                "Generator server error ({}): {}",
                status, error_body
            ))),
            _ => Err(GeneratorError::InvalidResponse(format!(
                "HTTP {}: {}",
                status, error_body
            ))),
        }
    }
}

#[async_trait]
impl ResponseGenerator for HttpResponseGenerator {
    async fn generate(&self, context: &PromptContext) -> Result<String, GeneratorError> {
        let request = GenerateRequest {
            message: context.render(),
        };
        let response = self.send_request(&request).await?;
        let response = self.handle_response_status(response).await?;
        let body = response
            .text()
            .await
            .map_err(|e| GeneratorError::InvalidResponse(e.to_string()))?;

        parse_reply(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_string() {
        assert_eq!(parse_reply(r#""I hear you.""#).unwrap(), "I hear you.");
    }

    #[test]
    fn parses_wrapped_response() {
        assert_eq!(
            parse_reply(r#"{"response": "  That sounds hard.  "}"#).unwrap(),
            "That sounds hard."
        );
    }

    #[test]
    fn blank_reply_is_invalid() {
        assert!(matches!(
            parse_reply(r#""   ""#),
            Err(GeneratorError::InvalidResponse(_))
        ));
    }

    #[test]
    fn unexpected_shape_is_invalid() {
        assert!(parse_reply(r#"{"choices": []}"#).is_err());
    }

    #[test]
    fn config_from_app_config_carries_timeout() {
        let app = GeneratorConfig {
            endpoint: Some("http://localhost:8080/chat".to_string()),
            timeout_secs: 12,
            ..GeneratorConfig::default()
        };
        let config = HttpGeneratorConfig::from_app_config(&app).unwrap();
        assert_eq!(config.endpoint, "http://localhost:8080/chat");
        assert_eq!(config.timeout, Duration::from_secs(12));
    }
}
