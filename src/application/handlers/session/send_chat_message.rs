//! SendChatMessageHandler - Supportive chat turn with risk assessment.
//!
//! Each message is classified and scored, checked for crisis signals, and
//! answered by the response generator. When the generator fails the user gets
//! a static fallback keyed by the dominant emotion instead of an error.

use std::sync::Arc;

use crate::domain::assessment::{
    rank_predictions, CrisisEvaluator, CrisisLevel, EmotionLabel, EmotionPrediction,
    RiskCalculator, RiskScore,
};
use crate::domain::conversation::{append_support_guidance, fallback_reply, PromptContext};
use crate::domain::foundation::{DomainError, Timestamp, Username, ValidationError};
use crate::domain::user::{ChatTurn, EmotionLogEntry, Origin, UserDirectory};
use crate::ports::{
    ClassifierError, CollectionStore, EmotionClassifier, ResponseGenerator, UserStore,
};

use super::collapse_whitespace;

/// Command to send a chat message.
#[derive(Debug, Clone)]
pub struct SendChatMessageCommand {
    pub username: String,
    pub message: String,
}

/// The assistant's answer and the assessment behind it.
#[derive(Debug, Clone)]
pub struct SendChatMessageResult {
    pub reply: String,
    pub predictions: Vec<EmotionPrediction>,
    /// Absent when nothing could be classified.
    pub risk_score: Option<RiskScore>,
    pub crisis_level: CrisisLevel,
    /// True when the classifier failed and the turn was assessed on keywords only.
    pub classifier_unavailable: bool,
    /// True when the generator failed and the static fallback was used.
    pub used_fallback: bool,
}

/// Handler for chat messages.
pub struct SendChatMessageHandler {
    users: Arc<dyn CollectionStore<UserDirectory>>,
    classifier: Arc<dyn EmotionClassifier>,
    generator: Arc<dyn ResponseGenerator>,
    top_k: usize,
}

impl SendChatMessageHandler {
    pub fn new(
        users: Arc<dyn CollectionStore<UserDirectory>>,
        classifier: Arc<dyn EmotionClassifier>,
        generator: Arc<dyn ResponseGenerator>,
        top_k: usize,
    ) -> Self {
        Self {
            users,
            classifier,
            generator,
            top_k: top_k.max(1),
        }
    }

    /// # Errors
    /// - `ValidationFailed` for a blank message
    /// - `NotFound` for an unknown user
    /// - storage failures
    ///
    /// Classifier and generator failures degrade instead of failing.
    pub async fn handle(
        &self,
        cmd: SendChatMessageCommand,
        now: Timestamp,
    ) -> Result<SendChatMessageResult, DomainError> {
        let username = Username::new(&cmd.username)?;
        let message = collapse_whitespace(&cmd.message);
        if message.is_empty() {
            return Err(ValidationError::empty_field("message").into());
        }

        let profile = self
            .users
            .find_user(&username)
            .await?
            .ok_or_else(|| DomainError::user_not_found(username.as_str()))?;

        let (predictions, classifier_unavailable) = match self.assess(&message).await {
            Ok(predictions) => (predictions, false),
            Err(err) => {
                tracing::warn!(
                    username = %username,
                    error = %err,
                    "Classifier failed during chat; continuing without predictions"
                );
                (Vec::new(), true)
            }
        };
        let risk_score = RiskCalculator::score(&predictions).ok();
        let crisis_level = CrisisEvaluator::evaluate(&message, risk_score);
        if crisis_level.is_escalated() {
            tracing::info!(crisis_level = %crisis_level, "Crisis level escalated");
        }

        let dominant = predictions
            .first()
            .map(|p| p.label.clone())
            .unwrap_or(EmotionLabel::Neutral);
        let context = PromptContext::build(
            &message,
            &predictions,
            risk_score,
            crisis_level,
            &profile.chat_history,
        );

        let (reply, used_fallback) = match self.generator.generate(&context).await {
            Ok(reply) => (
                append_support_guidance(&reply, crisis_level, risk_score, &dominant),
                false,
            ),
            Err(err) => {
                tracing::warn!(error = %err, "Response generator failed; using fallback reply");
                (fallback_reply(&dominant), true)
            }
        };

        let user_turn = ChatTurn::user(message.clone(), now);
        let assistant_turn = ChatTurn::assistant(reply.clone(), now, predictions.clone(), risk_score);
        let entry = risk_score.map(|score| EmotionLogEntry {
            timestamp: now,
            source_text: message,
            predictions: predictions.clone(),
            risk_score: score,
            origin: Origin::Chat,
        });

        self.users
            .with_user(&username, move |profile| {
                profile.chat_history.push(user_turn);
                profile.chat_history.push(assistant_turn);
                match entry {
                    Some(entry) => profile.record_emotion(entry),
                    None => profile.touch_activity(now),
                }
                Ok(())
            })
            .await?;

        Ok(SendChatMessageResult {
            reply,
            predictions,
            risk_score,
            crisis_level,
            classifier_unavailable,
            used_fallback,
        })
    }

    async fn assess(&self, message: &str) -> Result<Vec<EmotionPrediction>, ClassifierError> {
        let classifications = self.classifier.classify(message, self.top_k).await?;
        Ok(rank_predictions(
            classifications
                .iter()
                .map(|c| EmotionPrediction::from_classification(&c.label, c.confidence))
                .collect(),
            self.top_k,
        ))
    }
}
