//! Risk score calculation from ranked emotion predictions.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::emotion::{EmotionPrediction, RiskTier};
use crate::domain::foundation::{DomainError, ErrorCode};

/// Scoring could not produce a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    /// No predictions (or no confidence mass) to score.
    #[error("Insufficient data to compute a risk score")]
    InsufficientData,
}

impl From<ScoringError> for DomainError {
    fn from(err: ScoringError) -> Self {
        match err {
            ScoringError::InsufficientData => DomainError::new(ErrorCode::InsufficientData, err.to_string()),
        }
    }
}

/// Bounded risk score in [0, 100].
///
/// Serialized rounded to one decimal place.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct RiskScore(f64);

impl RiskScore {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 100.0;

    /// Creates a score, clamping into [0, 100].
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(Self::MIN);
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Value rounded to one decimal place.
    pub fn rounded(&self) -> f64 {
        (self.0 * 10.0).round() / 10.0
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

impl Serialize for RiskScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.rounded())
    }
}

impl<'de> Deserialize<'de> for RiskScore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::new(f64::deserialize(deserializer)?))
    }
}

/// Pure risk calculator.
pub struct RiskCalculator;

impl RiskCalculator {
    /// `100 × Σ(weight·confidence) / (3 × Σ confidence)`.
    ///
    /// # Errors
    /// `InsufficientData` when the input is empty or carries no confidence.
    pub fn score(predictions: &[EmotionPrediction]) -> Result<RiskScore, ScoringError> {
        if predictions.is_empty() {
            return Err(ScoringError::InsufficientData);
        }

        let (weighted, total) = predictions.iter().fold((0.0, 0.0), |(w, t), p| {
            (w + p.risk_tier.weight() * p.confidence, t + p.confidence)
        });

        if total <= 0.0 || !total.is_finite() {
            return Err(ScoringError::InsufficientData);
        }

        Ok(RiskScore::new(100.0 * weighted / (RiskTier::MAX_WEIGHT * total)))
    }
}
