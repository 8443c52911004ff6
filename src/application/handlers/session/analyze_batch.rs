//! AnalyzeBatchHandler - Bulk emotion analysis of many texts in one pass.
//!
//! Nothing is persisted. Blank entries and entries the classifier could not
//! label are marked in place so the output lines up with the input.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::domain::assessment::{
    rank_predictions, EmotionPrediction, RiskCalculator, RiskScore, RiskTier, ELEVATED_SCORE,
};
use crate::domain::foundation::{DomainError, ValidationError};
use crate::ports::EmotionClassifier;

use super::collapse_whitespace;

/// Characters of each text kept in a result preview.
pub const PREVIEW_CHARS: usize = 100;

/// Query over a list of texts, such as exported social media posts.
#[derive(Debug, Clone)]
pub struct AnalyzeBatchQuery {
    pub texts: Vec<String>,
    /// Overrides the configured number of predictions to keep.
    pub top_k: Option<usize>,
}

/// What happened to one input text.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    Scored {
        predictions: Vec<EmotionPrediction>,
        risk_score: RiskScore,
    },
    /// Empty or whitespace-only input; the classifier was not called.
    Blank,
    /// The classifier returned nothing usable.
    InsufficientData,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntry {
    /// Position in the input list.
    pub index: usize,
    pub preview: String,
    pub outcome: BatchOutcome,
}

impl BatchEntry {
    /// Highest-confidence prediction of a scored entry.
    pub fn primary(&self) -> Option<&EmotionPrediction> {
        match &self.outcome {
            BatchOutcome::Scored { predictions, .. } => predictions.first(),
            _ => None,
        }
    }

    pub fn risk_score(&self) -> Option<RiskScore> {
        match &self.outcome {
            BatchOutcome::Scored { risk_score, .. } => Some(*risk_score),
            _ => None,
        }
    }
}

/// Aggregates over the scored entries only.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub total: usize,
    pub scored: usize,
    pub skipped: usize,
    pub average_risk: Option<RiskScore>,
    pub average_confidence: Option<f64>,
    /// Entries with a risk score above the elevated threshold.
    pub high_risk_count: usize,
    /// Primary emotion label to entry count.
    pub emotion_distribution: BTreeMap<String, usize>,
    /// Risk tier of the primary emotion to entry count.
    pub tier_distribution: BTreeMap<RiskTier, usize>,
}

impl BatchSummary {
    fn from_entries(entries: &[BatchEntry]) -> Self {
        let scored: Vec<&BatchEntry> = entries.iter().filter(|e| e.primary().is_some()).collect();

        let mut emotion_distribution = BTreeMap::new();
        let mut tier_distribution = BTreeMap::new();
        let mut risk_sum = 0.0;
        let mut confidence_sum = 0.0;
        let mut high_risk_count = 0;
        for entry in &scored {
            if let (Some(primary), Some(score)) = (entry.primary(), entry.risk_score()) {
                *emotion_distribution
                    .entry(primary.label.as_str().to_string())
                    .or_insert(0) += 1;
                *tier_distribution.entry(primary.risk_tier).or_insert(0) += 1;
                risk_sum += score.value();
                confidence_sum += primary.confidence;
                if score.value() > ELEVATED_SCORE {
                    high_risk_count += 1;
                }
            }
        }

        let count = scored.len();
        let mean = |sum: f64| (count > 0).then(|| sum / count as f64);
        Self {
            total: entries.len(),
            scored: count,
            skipped: entries.len() - count,
            average_risk: mean(risk_sum).map(RiskScore::new),
            average_confidence: mean(confidence_sum),
            high_risk_count,
            emotion_distribution,
            tier_distribution,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalyzeBatchResult {
    pub entries: Vec<BatchEntry>,
    pub summary: BatchSummary,
}

/// Handler for bulk analysis.
pub struct AnalyzeBatchHandler {
    classifier: Arc<dyn EmotionClassifier>,
    default_top_k: usize,
}

impl AnalyzeBatchHandler {
    pub fn new(classifier: Arc<dyn EmotionClassifier>, default_top_k: usize) -> Self {
        Self {
            classifier,
            default_top_k,
        }
    }

    /// Scores every text independently. Identical texts are classified once.
    ///
    /// # Errors
    /// - `ValidationFailed` for an empty list
    /// - `ClassifierUnavailable` when the classifier fails; no partial result
    pub async fn handle(&self, query: AnalyzeBatchQuery) -> Result<AnalyzeBatchResult, DomainError> {
        if query.texts.is_empty() {
            return Err(ValidationError::empty_field("texts").into());
        }
        let top_k = query.top_k.unwrap_or(self.default_top_k).max(1);

        let mut cache: HashMap<String, BatchOutcome> = HashMap::new();
        let mut entries = Vec::with_capacity(query.texts.len());
        for (index, raw) in query.texts.iter().enumerate() {
            let text = collapse_whitespace(raw);
            let outcome = if text.is_empty() {
                BatchOutcome::Blank
            } else if let Some(known) = cache.get(&text) {
                known.clone()
            } else {
                let outcome = self.score(&text, top_k).await?;
                cache.insert(text.clone(), outcome.clone());
                outcome
            };
            entries.push(BatchEntry {
                index,
                preview: preview(&text),
                outcome,
            });
        }

        let summary = BatchSummary::from_entries(&entries);
        tracing::info!(
            total = summary.total,
            scored = summary.scored,
            high_risk = summary.high_risk_count,
            "Batch analyzed"
        );
        Ok(AnalyzeBatchResult { entries, summary })
    }

    async fn score(&self, text: &str, top_k: usize) -> Result<BatchOutcome, DomainError> {
        let classifications = self.classifier.classify(text, top_k).await?;
        let predictions = rank_predictions(
            classifications
                .iter()
                .map(|c| EmotionPrediction::from_classification(&c.label, c.confidence))
                .collect(),
            top_k,
        );
        Ok(match RiskCalculator::score(&predictions) {
            Ok(risk_score) => BatchOutcome::Scored {
                predictions,
                risk_score,
            },
            Err(_) => BatchOutcome::InsufficientData,
        })
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() > PREVIEW_CHARS {
        let head: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
