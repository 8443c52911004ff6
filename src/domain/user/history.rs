//! Append-only emotion and chat history records.

use serde::{Deserialize, Serialize};

use crate::domain::assessment::{EmotionPrediction, RiskScore};
use crate::domain::foundation::Timestamp;

/// Where an emotion log entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    #[default]
    DirectAnalysis,
    #[serde(alias = "chatbot")]
    Chat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionLogEntry {
    pub timestamp: Timestamp,
    #[serde(rename = "text")]
    pub source_text: String,
    #[serde(rename = "emotions", default)]
    pub predictions: Vec<EmotionPrediction>,
    pub risk_score: RiskScore,
    #[serde(rename = "source", default)]
    pub origin: Origin,
}

impl EmotionLogEntry {
    /// Highest-confidence prediction, if any.
    pub fn dominant(&self) -> Option<&EmotionPrediction> {
        self.predictions.first()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
    pub timestamp: Timestamp,
    /// Present on assistant turns: the assessment of the preceding user turn.
    #[serde(rename = "emotions", default, skip_serializing_if = "Option::is_none")]
    pub predictions: Option<Vec<EmotionPrediction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<RiskScore>,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>, timestamp: Timestamp) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            timestamp,
            predictions: None,
            risk_score: None,
        }
    }

    pub fn assistant(
        content: impl Into<String>,
        timestamp: Timestamp,
        predictions: Vec<EmotionPrediction>,
        risk_score: Option<RiskScore>,
    ) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            timestamp,
            predictions: Some(predictions),
            risk_score,
        }
    }
}
