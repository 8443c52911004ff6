//! HTTP emotion classifier.
//!
//! Talks to a hosted text-classification endpoint that accepts
//! `{"inputs": "..."}` and answers with label/score pairs, either flat
//! (`[{label, score}]`) or nested one level (`[[{label, score}]]`).

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ClassifierConfig;
use crate::ports::{Classification, ClassifierError, EmotionClassifier};

/// Configuration for the HTTP classifier.
#[derive(Debug, Clone)]
pub struct HttpClassifierConfig {
    pub endpoint: String,
    pub api_token: Option<Secret<String>>,
    pub timeout: Duration,
}

impl HttpClassifierConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_token: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the bearer token.
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(Secret::new(token.into()));
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds from application config; `None` when no endpoint is set.
    pub fn from_app_config(config: &ClassifierConfig) -> Option<Self> {
        let endpoint = config.endpoint.as_ref().filter(|e| !e.is_empty())?;
        Some(Self {
            endpoint: endpoint.clone(),
            api_token: config.api_token.clone(),
            timeout: config.timeout(),
        })
    }
}

#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassifyResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl ClassifyResponse {
    fn into_classifications(self) -> Vec<Classification> {
        let scores = match self {
            ClassifyResponse::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
            ClassifyResponse::Flat(scores) => scores,
        };
        scores
            .into_iter()
            .map(|s| Classification::new(s.label, s.score))
            .collect()
    }
}

/// Parses a classifier response body.
fn parse_classifications(body: &str) -> Result<Vec<Classification>, ClassifierError> {
    serde_json::from_str::<ClassifyResponse>(body)
        .map(ClassifyResponse::into_classifications)
        .map_err(|e| ClassifierError::InvalidResponse(e.to_string()))
}

/// Emotion classifier backed by an HTTP inference endpoint.
#[derive(Debug, Clone)]
pub struct HttpEmotionClassifier {
    config: HttpClassifierConfig,
    client: Client,
}

impl HttpEmotionClassifier {
    /// Creates a classifier with its own HTTP client.
    ///
    /// # Errors
    /// Returns `ClassifierError::Unavailable` if the HTTP client cannot be built
    pub fn new(config: HttpClassifierConfig) -> Result<Self, ClassifierError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClassifierError::Unavailable(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    async fn send_request(&self, text: &str) -> Result<Response, ClassifierError> {
        let mut request = self
            .client
            .post(&self.config.endpoint)
            .json(&ClassifyRequest { inputs: text });
        if let Some(token) = &self.config.api_token {
            request = request.header("Authorization", format!("Bearer {}", token.expose_secret()));
        }

        request.send().await.map_err(|e| {
            if e.is_timeout() {
                ClassifierError::Timeout {
                    timeout_secs: self.config.timeout.as_secs(),
                }
            } else if e.is_connect() {
                ClassifierError::Unavailable(format!("Connection failed: {}", e))
            } else {
                ClassifierError::Unavailable(e.to_string())
            }
        })
    }

    async fn handle_response_status(&self, response: Response) -> Result<Response, ClassifierError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 | 403 => Err(ClassifierError::Unavailable(
                "Classifier rejected credentials".to_string(),
            )),
            429 => Err(ClassifierError::Unavailable("Classifier rate limited".to_string())),
            // Hosted models answer 503 while loading.
            500..=599 => Err(ClassifierError::Unavailable(format!(
                "Classifier server error ({}): {}",
                status, error_body
            ))),
            _ => Err(ClassifierError::InvalidResponse(format!(
                "HTTP {}: {}",
                status, error_body
            ))),
        }
    }
}

#[async_trait]
impl EmotionClassifier for HttpEmotionClassifier {
    async fn classify(&self, text: &str, top_k: usize) -> Result<Vec<Classification>, ClassifierError> {
        let response = self.send_request(text).await?;
        let response = self.handle_response_status(response).await?;
        let body = response
            .text()
            .await
            .map_err(|e| ClassifierError::InvalidResponse(e.to_string()))?;

        let mut classifications = parse_classifications(&body)?;
        classifications.truncate(top_k);

        tracing::debug!(
            count = classifications.len(),
            "Classifier returned predictions"
        );
        Ok(classifications)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_response() {
        let body = r#"[[{"label":"sadness","score":0.8},{"label":"grief","score":0.1}]]"#;
        let parsed = parse_classifications(body).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0], Classification::new("sadness", 0.8));
    }

    #[test]
    fn parses_flat_response() {
        let body = r#"[{"label":"joy","score":0.9}]"#;
        let parsed = parse_classifications(body).unwrap();
        assert_eq!(parsed, vec![Classification::new("joy", 0.9)]);
    }

    #[test]
    fn empty_nested_response_yields_nothing() {
        assert!(parse_classifications("[[]]").unwrap().is_empty());
    }

    #[test]
    fn error_object_is_invalid_response() {
        let err = parse_classifications(r#"{"error":"Model is loading"}"#).unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidResponse(_)));
    }

    #[test]
    fn config_from_app_config_requires_endpoint() {
        assert!(HttpClassifierConfig::from_app_config(&ClassifierConfig::default()).is_none());

        let app = ClassifierConfig {
            endpoint: Some("https://models.example/emotions".to_string()),
            timeout_secs: 7,
            ..ClassifierConfig::default()
        };
        let config = HttpClassifierConfig::from_app_config(&app).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(7));
    }

    #[test]
    fn debug_output_hides_token() {
        let config = HttpClassifierConfig::new("https://models.example").with_api_token("hf_secret");
        assert!(!format!("{:?}", config).contains("hf_secret"));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_unavailable() {
        let classifier = HttpEmotionClassifier::new(
            HttpClassifierConfig::new("http://127.0.0.1:1/classify")
                .with_timeout(Duration::from_secs(2)),
        )
        .unwrap();

        let err = classifier.classify("hello", 3).await.unwrap_err();
        assert!(matches!(
            err,
            ClassifierError::Unavailable(_) | ClassifierError::Timeout { .. }
        ));
    }
}
