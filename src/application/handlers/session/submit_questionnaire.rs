//! SubmitQuestionnaireHandler - Scores and stores a DASS-42 submission.

use std::sync::Arc;

use crate::domain::assessment::{
    DassCategory, DassResult, QuestionnaireResponseSet, Severity, SUBMISSION_THRESHOLD_PERCENT,
};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, Username};
use crate::domain::user::UserDirectory;
use crate::ports::{CollectionStore, UserStore};

/// Command to submit questionnaire answers.
#[derive(Debug, Clone)]
pub struct SubmitQuestionnaireCommand {
    pub username: String,
    pub responses: QuestionnaireResponseSet,
}

/// Result of a scored submission.
#[derive(Debug, Clone)]
pub struct SubmitQuestionnaireResult {
    pub result: DassResult,
    pub overall_category: DassCategory,
    pub overall_severity: Severity,
}

/// Handler for questionnaire submissions.
pub struct SubmitQuestionnaireHandler {
    users: Arc<dyn CollectionStore<UserDirectory>>,
    threshold_percent: f64,
}

impl SubmitQuestionnaireHandler {
    pub fn new(users: Arc<dyn CollectionStore<UserDirectory>>) -> Self {
        Self {
            users,
            threshold_percent: SUBMISSION_THRESHOLD_PERCENT,
        }
    }

    /// Sets the minimum completion percentage required to submit.
    pub fn with_threshold(mut self, threshold_percent: f64) -> Self {
        self.threshold_percent = threshold_percent;
        self
    }

    /// # Errors
    /// - `IncompleteSubmission` below the completion threshold; nothing is stored
    /// - `NotFound` for an unknown user
    pub async fn handle(
        &self,
        cmd: SubmitQuestionnaireCommand,
        now: Timestamp,
    ) -> Result<SubmitQuestionnaireResult, DomainError> {
        let username = Username::new(&cmd.username)?;

        let completion = cmd.responses.completion_percentage();
        if completion < self.threshold_percent {
            return Err(DomainError::new(
                ErrorCode::IncompleteSubmission,
                format!(
                    "Please answer at least {:.0}% of the questions before submitting",
                    self.threshold_percent
                ),
            )
            .with_detail("answered", cmd.responses.answered().to_string())
            .with_detail("completion_percentage", format!("{:.1}", completion)));
        }

        let result = DassResult::score(&cmd.responses, now);
        let stored = result.clone();
        self.users
            .with_user(&username, move |profile| {
                profile.record_dass(stored);
                Ok(())
            })
            .await?;

        let (overall_category, overall_severity) = result.overall();
        tracing::info!(
            username = %username,
            overall_category = %overall_category,
            overall_severity = %overall_severity,
            "Questionnaire submitted"
        );

        Ok(SubmitQuestionnaireResult {
            result,
            overall_category,
            overall_severity,
        })
    }
}
