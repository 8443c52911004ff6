//! Emotion labels and their mental-health risk mapping.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse severity bucket attached to an emotion label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Weight used by the risk score: high=3, medium=2, low=1.
    pub fn weight(&self) -> f64 {
        match self {
            RiskTier::Low => 1.0,
            RiskTier::Medium => 2.0,
            RiskTier::High => 3.0,
        }
    }

    pub const MAX_WEIGHT: f64 = 3.0;
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskTier::Low => write!(f, "low"),
            RiskTier::Medium => write!(f, "medium"),
            RiskTier::High => write!(f, "high"),
        }
    }
}

/// Labels emitted by the emotion classifier.
///
/// Anything the table does not know lands in `Unknown` and is treated as low risk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EmotionLabel {
    Admiration,
    Amusement,
    Anger,
    Annoyance,
    Approval,
    Caring,
    Confusion,
    Curiosity,
    Desire,
    Disappointment,
    Disapproval,
    Disgust,
    Embarrassment,
    Excitement,
    Fear,
    Gratitude,
    Grief,
    Joy,
    Love,
    Nervousness,
    Optimism,
    Pride,
    Realization,
    Relief,
    Remorse,
    Sadness,
    Surprise,
    Neutral,
    Unknown(String),
}

impl EmotionLabel {
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "admiration" => Self::Admiration,
            "amusement" => Self::Amusement,
            "anger" => Self::Anger,
            "annoyance" => Self::Annoyance,
            "approval" => Self::Approval,
            "caring" => Self::Caring,
            "confusion" => Self::Confusion,
            "curiosity" => Self::Curiosity,
            "desire" => Self::Desire,
            "disappointment" => Self::Disappointment,
            "disapproval" => Self::Disapproval,
            "disgust" => Self::Disgust,
            "embarrassment" => Self::Embarrassment,
            "excitement" => Self::Excitement,
            "fear" => Self::Fear,
            "gratitude" => Self::Gratitude,
            "grief" => Self::Grief,
            "joy" => Self::Joy,
            "love" => Self::Love,
            "nervousness" => Self::Nervousness,
            "optimism" => Self::Optimism,
            "pride" => Self::Pride,
            "realization" => Self::Realization,
            "relief" => Self::Relief,
            "remorse" => Self::Remorse,
            "sadness" => Self::Sadness,
            "surprise" => Self::Surprise,
            "neutral" => Self::Neutral,
            _ => Self::Unknown(label.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Admiration => "admiration",
            Self::Amusement => "amusement",
            Self::Anger => "anger",
            Self::Annoyance => "annoyance",
            Self::Approval => "approval",
            Self::Caring => "caring",
            Self::Confusion => "confusion",
            Self::Curiosity => "curiosity",
            Self::Desire => "desire",
            Self::Disappointment => "disappointment",
            Self::Disapproval => "disapproval",
            Self::Disgust => "disgust",
            Self::Embarrassment => "embarrassment",
            Self::Excitement => "excitement",
            Self::Fear => "fear",
            Self::Gratitude => "gratitude",
            Self::Grief => "grief",
            Self::Joy => "joy",
            Self::Love => "love",
            Self::Nervousness => "nervousness",
            Self::Optimism => "optimism",
            Self::Pride => "pride",
            Self::Realization => "realization",
            Self::Relief => "relief",
            Self::Remorse => "remorse",
            Self::Sadness => "sadness",
            Self::Surprise => "surprise",
            Self::Neutral => "neutral",
            Self::Unknown(label) => label,
        }
    }

    /// Risk tier from the mental-health mapping table.
    pub fn risk_tier(&self) -> RiskTier {
        match self {
            Self::Fear | Self::Grief | Self::Sadness => RiskTier::High,
            Self::Anger
            | Self::Disappointment
            | Self::Disgust
            | Self::Embarrassment
            | Self::Nervousness
            | Self::Remorse => RiskTier::Medium,
            Self::Admiration
            | Self::Amusement
            | Self::Annoyance
            | Self::Approval
            | Self::Caring
            | Self::Confusion
            | Self::Curiosity
            | Self::Desire
            | Self::Disapproval
            | Self::Excitement
            | Self::Gratitude
            | Self::Joy
            | Self::Love
            | Self::Optimism
            | Self::Pride
            | Self::Realization
            | Self::Relief
            | Self::Surprise
            | Self::Neutral
            | Self::Unknown(_) => RiskTier::Low,
        }
    }

    /// Clinical concern tag from the mental-health mapping table.
    pub fn concern(&self) -> &'static str {
        match self {
            Self::Admiration
            | Self::Amusement
            | Self::Approval
            | Self::Caring
            | Self::Curiosity
            | Self::Excitement
            | Self::Gratitude
            | Self::Joy
            | Self::Love
            | Self::Optimism
            | Self::Pride => "positive",
            Self::Anger => "stress/aggression",
            Self::Annoyance => "mild irritation",
            Self::Confusion => "cognitive uncertainty",
            Self::Desire => "motivation",
            Self::Disappointment => "mild depression",
            Self::Disapproval => "negative judgment",
            Self::Disgust => "aversion/stress",
            Self::Embarrassment => "social anxiety",
            Self::Fear => "anxiety disorder",
            Self::Grief => "severe depression",
            Self::Nervousness => "anxiety",
            Self::Realization => "insight",
            Self::Relief => "stress reduction",
            Self::Remorse => "guilt/regret",
            Self::Sadness => "depression",
            Self::Surprise => "neutral",
            Self::Neutral => "stable",
            Self::Unknown(_) => "unknown",
        }
    }
}

impl From<String> for EmotionLabel {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<EmotionLabel> for String {
    fn from(value: EmotionLabel) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One ranked classifier prediction enriched with its risk mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionPrediction {
    #[serde(rename = "emotion")]
    pub label: EmotionLabel,
    /// Classifier confidence in [0, 1].
    pub confidence: f64,
    #[serde(rename = "risk_level")]
    pub risk_tier: RiskTier,
    pub concern: String,
}

impl EmotionPrediction {
    /// Builds a prediction from a raw `{label, confidence}` pair.
    ///
    /// Confidence is clamped into [0, 1]; NaN becomes 0.
    pub fn from_classification(label: &str, confidence: f64) -> Self {
        let label = EmotionLabel::parse(label);
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            risk_tier: label.risk_tier(),
            concern: label.concern().to_string(),
            label,
            confidence,
        }
    }
}

/// Orders raw classifications highest-confidence first and keeps `top_k`.
pub fn rank_predictions(mut predictions: Vec<EmotionPrediction>, top_k: usize) -> Vec<EmotionPrediction> {
    predictions.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    predictions.truncate(top_k);
    predictions
}
