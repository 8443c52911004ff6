//! Assessment module - emotion risk scoring, DASS-42 and crisis detection.
//!
//! Everything here is pure: no I/O and no clock reads.

mod crisis;
mod dass;
mod emotion;
mod risk_score;

pub use crisis::{
    CrisisEvaluator, CrisisLevel, DistressBand, CRISIS_PHRASES, CRITICAL_SCORE, ELEVATED_SCORE,
};
pub use dass::{
    DassCategory, DassResult, DassScores, DassSeverities, QuestionnaireResponseSet, Severity,
    GROUP_SIZE, MAX_ANSWER, QUESTION_COUNT, SUBMISSION_THRESHOLD_PERCENT,
};
pub use emotion::{rank_predictions, EmotionLabel, EmotionPrediction, RiskTier};
pub use risk_score::{RiskCalculator, RiskScore, ScoringError};
