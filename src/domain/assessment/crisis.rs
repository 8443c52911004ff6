//! Crisis escalation decision.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::risk_score::RiskScore;

/// Phrases that escalate a message to critical regardless of score.
pub const CRISIS_PHRASES: [&str; 11] = [
    "suicide",
    "kill myself",
    "end it all",
    "want to die",
    "no reason to live",
    "hurt myself",
    "self harm",
    "ending my life",
    "better off dead",
    "can't go on",
    "give up on life",
];

/// Scores above this are critical.
pub const CRITICAL_SCORE: f64 = 85.0;

/// Scores above this are elevated.
pub const ELEVATED_SCORE: f64 = 66.0;

const MANAGING_SCORE: f64 = 45.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrisisLevel {
    None,
    Elevated,
    Critical,
}

impl CrisisLevel {
    pub fn is_escalated(&self) -> bool {
        !matches!(self, CrisisLevel::None)
    }
}

impl fmt::Display for CrisisLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrisisLevel::None => write!(f, "none"),
            CrisisLevel::Elevated => write!(f, "elevated"),
            CrisisLevel::Critical => write!(f, "critical"),
        }
    }
}

/// Coarse reading of a risk score for prompt context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistressBand {
    Stable,
    Managing,
    Distressed,
}

impl DistressBand {
    pub fn from_score(score: RiskScore) -> Self {
        let value = score.value();
        if value > ELEVATED_SCORE {
            DistressBand::Distressed
        } else if value > MANAGING_SCORE {
            DistressBand::Managing
        } else {
            DistressBand::Stable
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            DistressBand::Stable => "relatively stable",
            DistressBand::Managing => "managing some difficulty",
            DistressBand::Distressed => "experiencing significant distress",
        }
    }
}

/// Pure crisis evaluator.
pub struct CrisisEvaluator;

impl CrisisEvaluator {
    /// Keyword match is a plain case-insensitive substring test.
    pub fn evaluate(text: &str, score: Option<RiskScore>) -> CrisisLevel {
        if Self::contains_crisis_phrase(text) {
            return CrisisLevel::Critical;
        }
        match score.map(|s| s.value()) {
            Some(v) if v > CRITICAL_SCORE => CrisisLevel::Critical,
            Some(v) if v > ELEVATED_SCORE => CrisisLevel::Elevated,
            _ => CrisisLevel::None,
        }
    }

    pub fn contains_crisis_phrase(text: &str) -> bool {
        let lowered = text.to_lowercase();
        CRISIS_PHRASES.iter().any(|phrase| lowered.contains(phrase))
    }
}
