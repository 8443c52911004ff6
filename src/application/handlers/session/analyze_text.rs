//! AnalyzeTextHandler - Direct emotion analysis of free text.

use std::sync::Arc;

use crate::domain::assessment::{
    rank_predictions, CrisisEvaluator, CrisisLevel, EmotionPrediction, RiskCalculator, RiskScore,
    ScoringError,
};
use crate::domain::engagement::CheckInOutcome;
use crate::domain::foundation::{DomainError, Timestamp, Username};
use crate::domain::user::{EmotionLogEntry, Origin, UserDirectory};
use crate::ports::{CollectionStore, EmotionClassifier, UserStore};

use super::collapse_whitespace;

/// Command to analyze a piece of text for a user.
#[derive(Debug, Clone)]
pub struct AnalyzeTextCommand {
    pub username: String,
    pub text: String,
    /// Overrides the configured number of predictions to keep.
    pub top_k: Option<usize>,
}

/// Result of a successful analysis.
#[derive(Debug, Clone)]
pub struct AnalyzeTextResult {
    pub entry: EmotionLogEntry,
    pub crisis_level: CrisisLevel,
    pub check_in: CheckInOutcome,
    pub streak_count: u32,
}

impl AnalyzeTextResult {
    pub fn predictions(&self) -> &[EmotionPrediction] {
        &self.entry.predictions
    }

    pub fn risk_score(&self) -> RiskScore {
        self.entry.risk_score
    }
}

/// Handler for direct text analysis.
pub struct AnalyzeTextHandler {
    users: Arc<dyn CollectionStore<UserDirectory>>,
    classifier: Arc<dyn EmotionClassifier>,
    default_top_k: usize,
}

impl AnalyzeTextHandler {
    pub fn new(
        users: Arc<dyn CollectionStore<UserDirectory>>,
        classifier: Arc<dyn EmotionClassifier>,
        default_top_k: usize,
    ) -> Self {
        Self {
            users,
            classifier,
            default_top_k,
        }
    }

    /// Classifies the text, scores it, and records the entry and a check-in.
    ///
    /// # Errors
    /// - `InsufficientData` for blank text or when nothing was classified;
    ///   nothing is persisted
    /// - `ClassifierUnavailable` when the classifier fails
    /// - `NotFound` for an unknown user
    pub async fn handle(
        &self,
        cmd: AnalyzeTextCommand,
        now: Timestamp,
    ) -> Result<AnalyzeTextResult, DomainError> {
        let username = Username::new(&cmd.username)?;
        let text = collapse_whitespace(&cmd.text);
        if text.is_empty() {
            return Err(ScoringError::InsufficientData.into());
        }

        let top_k = cmd.top_k.unwrap_or(self.default_top_k).max(1);
        let classifications = self.classifier.classify(&text, top_k).await?;
        let predictions = rank_predictions(
            classifications
                .iter()
                .map(|c| EmotionPrediction::from_classification(&c.label, c.confidence))
                .collect(),
            top_k,
        );
        let risk_score = RiskCalculator::score(&predictions)?;
        let crisis_level = CrisisEvaluator::evaluate(&text, Some(risk_score));

        let entry = EmotionLogEntry {
            timestamp: now,
            source_text: text,
            predictions,
            risk_score,
            origin: Origin::DirectAnalysis,
        };

        let recorded = entry.clone();
        let (check_in, streak_count) = self
            .users
            .with_user(&username, move |profile| {
                profile.record_emotion(recorded);
                let outcome = profile.check_in(now);
                Ok((outcome, profile.streak.count))
            })
            .await?;

        tracing::debug!(
            username = %username,
            risk_score = %risk_score,
            "Text analyzed"
        );
        if crisis_level.is_escalated() {
            tracing::info!(crisis_level = %crisis_level, "Crisis level escalated");
        }

        Ok(AnalyzeTextResult {
            entry,
            crisis_level,
            check_in,
            streak_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockEmotionClassifier;
    use crate::adapters::storage::InMemoryStore;
    use crate::domain::foundation::ErrorCode;
    use crate::ports::ClassifierError;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    async fn users() -> Arc<InMemoryStore<UserDirectory>> {
        let store = Arc::new(InMemoryStore::<UserDirectory>::new());
        store
            .register(
                Username::new("river").unwrap(),
                "pw",
                "r@example.com",
                ts("2024-01-01T00:00:00Z"),
            )
            .await
            .unwrap();
        store
    }

    fn command(text: &str) -> AnalyzeTextCommand {
        AnalyzeTextCommand {
            username: "river".to_string(),
            text: text.to_string(),
            top_k: None,
        }
    }

    #[tokio::test]
    async fn records_entry_and_checks_in() {
        let store = users().await;
        let classifier = Arc::new(
            MockEmotionClassifier::new().with_predictions(vec![("joy", 0.2), ("sadness", 0.8)]),
        );
        let handler = AnalyzeTextHandler::new(store.clone(), classifier.clone(), 5);

        let result = handler
            .handle(command("  a   long\n day "), ts("2024-01-02T10:00:00Z"))
            .await
            .unwrap();

        assert_eq!(result.predictions()[0].label.as_str(), "sadness");
        assert_eq!(result.check_in, CheckInOutcome::Started);
        assert_eq!(result.streak_count, 1);
        assert_eq!(classifier.get_calls()[0].text, "a long day");

        let river = Username::new("river").unwrap();
        let directory = store.snapshot().await;
        let profile = directory.get(&river).unwrap();
        assert_eq!(profile.analysis_count, 1);
        assert_eq!(profile.emotion_history.len(), 1);
        assert_eq!(profile.last_analysis_at(), ts("2024-01-02T10:00:00Z"));
    }

    #[tokio::test]
    async fn blank_text_is_insufficient_and_skips_classifier() {
        let store = users().await;
        let classifier = Arc::new(MockEmotionClassifier::new());
        let handler = AnalyzeTextHandler::new(store.clone(), classifier.clone(), 5);

        let err = handler.handle(command(" \n\t "), Timestamp::now()).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::InsufficientData);
        assert_eq!(classifier.call_count(), 0);
    }

    #[tokio::test]
    async fn empty_predictions_persist_nothing() {
        let store = users().await;
        let classifier =
            Arc::new(MockEmotionClassifier::new().with_predictions(Vec::<(&str, f64)>::new()));
        let handler = AnalyzeTextHandler::new(store.clone(), classifier, 5);

        let err = handler.handle(command("hello"), Timestamp::now()).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::InsufficientData);
        let river = Username::new("river").unwrap();
        assert_eq!(store.snapshot().await.get(&river).unwrap().analysis_count, 0);
    }

    #[tokio::test]
    async fn classifier_failure_is_surfaced() {
        let classifier = Arc::new(
            MockEmotionClassifier::new().with_error(ClassifierError::Unavailable("down".into())),
        );
        let handler = AnalyzeTextHandler::new(users().await, classifier, 5);

        let err = handler.handle(command("hello"), Timestamp::now()).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::ClassifierUnavailable);
    }

    #[tokio::test]
    async fn crisis_phrase_escalates_to_critical() {
        let classifier = Arc::new(MockEmotionClassifier::new().with_predictions(vec![("neutral", 0.9)]));
        let handler = AnalyzeTextHandler::new(users().await, classifier, 5);

        let result = handler
            .handle(command("I want to die"), Timestamp::now())
            .await
            .unwrap();

        assert_eq!(result.crisis_level, CrisisLevel::Critical);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let handler = AnalyzeTextHandler::new(
            Arc::new(InMemoryStore::<UserDirectory>::new()),
            Arc::new(MockEmotionClassifier::new()),
            5,
        );
        let err = handler.handle(command("hello"), Timestamp::now()).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn top_k_override_is_passed_to_classifier() {
        let classifier = Arc::new(MockEmotionClassifier::new());
        let handler = AnalyzeTextHandler::new(users().await, classifier.clone(), 5);
        let mut cmd = command("hello");
        cmd.top_k = Some(2);

        handler.handle(cmd, Timestamp::now()).await.unwrap();

        assert_eq!(classifier.get_calls()[0].top_k, 2);
    }
}
