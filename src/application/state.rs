//! Shared engine state and handler construction.
//!
//! Holds the three collection stores, the collaborators and the tuning values
//! from configuration, and builds handlers on demand.

use chrono::Duration;
use std::sync::Arc;

use crate::adapters::ai::{
    HttpClassifierConfig, HttpEmotionClassifier, HttpGeneratorConfig, HttpResponseGenerator,
};
use crate::adapters::report::MarkdownReportRenderer;
use crate::adapters::storage::FileStores;
use crate::config::AppConfig;
use crate::domain::community::{GratitudeJournal, PostBoard};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::user::UserDirectory;
use crate::ports::{CollectionStore, EmotionClassifier, ReportRenderer, ResponseGenerator};

use super::handlers::community::{
    AddGratitudeEntryHandler, CreatePostHandler, ListGratitudeEntriesHandler, ListPostsHandler,
    ReactToPostHandler,
};
use super::handlers::engagement::{
    AddCustomTaskHandler, CompleteBreathingExerciseHandler, CompleteTaskHandler,
    RemoveCustomTaskHandler,
};
use super::handlers::report::{BuildReportHandler, RenderReportHandler};
use super::handlers::session::{
    AnalyzeBatchHandler, AnalyzeTextHandler, CheckStalenessHandler, ClearConversationHandler,
    ClearHistoryHandler, SendChatMessageHandler, SubmitQuestionnaireHandler,
};
use super::handlers::user::{AuthenticateUserHandler, RegisterUserHandler};

/// Everything handlers need, cheap to clone.
#[derive(Clone)]
pub struct EngineState {
    pub users: Arc<dyn CollectionStore<UserDirectory>>,
    pub posts: Arc<dyn CollectionStore<PostBoard>>,
    pub gratitude: Arc<dyn CollectionStore<GratitudeJournal>>,
    pub classifier: Arc<dyn EmotionClassifier>,
    pub generator: Arc<dyn ResponseGenerator>,
    pub renderer: Arc<dyn ReportRenderer>,
    pub analysis_top_k: usize,
    pub chat_top_k: usize,
    pub staleness: Duration,
    pub submission_threshold_percent: f64,
}

impl EngineState {
    /// File-backed stores from configuration with the given collaborators.
    pub fn with_file_stores(
        config: &AppConfig,
        classifier: Arc<dyn EmotionClassifier>,
        generator: Arc<dyn ResponseGenerator>,
    ) -> Self {
        let stores = FileStores::open(&config.storage);
        Self {
            users: stores.users,
            posts: stores.posts,
            gratitude: stores.gratitude,
            classifier,
            generator,
            renderer: Arc::new(MarkdownReportRenderer::new()),
            analysis_top_k: config.classifier.top_k,
            chat_top_k: config.classifier.chat_top_k,
            staleness: config.engagement.staleness(),
            submission_threshold_percent: config.engagement.submission_threshold_percent,
        }
    }

    /// File-backed stores and HTTP collaborators, all from configuration.
    ///
    /// # Errors
    /// `ClassifierUnavailable` / `ResponseGeneratorUnavailable` when an
    /// endpoint is missing or its client cannot be built.
    pub fn connect(config: &AppConfig) -> Result<Self, DomainError> {
        let classifier_config = HttpClassifierConfig::from_app_config(&config.classifier)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::ClassifierUnavailable,
                    "No classifier endpoint configured",
                )
            })?;
        let generator_config = HttpGeneratorConfig::from_app_config(&config.generator)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::ResponseGeneratorUnavailable,
                    "No response generator endpoint configured",
                )
            })?;

        let classifier = Arc::new(HttpEmotionClassifier::new(classifier_config)?);
        let generator = Arc::new(HttpResponseGenerator::new(generator_config)?);
        Ok(Self::with_file_stores(config, classifier, generator))
    }

    /// Replaces the report renderer.
    pub fn with_renderer(mut self, renderer: Arc<dyn ReportRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn register_user_handler(&self) -> RegisterUserHandler {
        RegisterUserHandler::new(self.users.clone())
    }

    pub fn authenticate_user_handler(&self) -> AuthenticateUserHandler {
        AuthenticateUserHandler::new(self.users.clone())
    }

    pub fn analyze_text_handler(&self) -> AnalyzeTextHandler {
        AnalyzeTextHandler::new(self.users.clone(), self.classifier.clone(), self.analysis_top_k)
    }

    pub fn analyze_batch_handler(&self) -> AnalyzeBatchHandler {
        AnalyzeBatchHandler::new(self.classifier.clone(), self.analysis_top_k)
    }

    pub fn submit_questionnaire_handler(&self) -> SubmitQuestionnaireHandler {
        SubmitQuestionnaireHandler::new(self.users.clone())
            .with_threshold(self.submission_threshold_percent)
    }

    pub fn send_chat_message_handler(&self) -> SendChatMessageHandler {
        SendChatMessageHandler::new(
            self.users.clone(),
            self.classifier.clone(),
            self.generator.clone(),
            self.chat_top_k,
        )
    }

    pub fn clear_history_handler(&self) -> ClearHistoryHandler {
        ClearHistoryHandler::new(self.users.clone())
    }

    pub fn clear_conversation_handler(&self) -> ClearConversationHandler {
        ClearConversationHandler::new(self.users.clone())
    }

    pub fn check_staleness_handler(&self) -> CheckStalenessHandler {
        CheckStalenessHandler::new(self.users.clone()).with_threshold(self.staleness)
    }

    pub fn complete_task_handler(&self) -> CompleteTaskHandler {
        CompleteTaskHandler::new(self.users.clone())
    }

    pub fn add_custom_task_handler(&self) -> AddCustomTaskHandler {
        AddCustomTaskHandler::new(self.users.clone())
    }

    pub fn remove_custom_task_handler(&self) -> RemoveCustomTaskHandler {
        RemoveCustomTaskHandler::new(self.users.clone())
    }

    pub fn complete_breathing_exercise_handler(&self) -> CompleteBreathingExerciseHandler {
        CompleteBreathingExerciseHandler::new(self.users.clone())
    }

    pub fn create_post_handler(&self) -> CreatePostHandler {
        CreatePostHandler::new(self.posts.clone())
    }

    pub fn react_to_post_handler(&self) -> ReactToPostHandler {
        ReactToPostHandler::new(self.posts.clone())
    }

    pub fn list_posts_handler(&self) -> ListPostsHandler {
        ListPostsHandler::new(self.posts.clone())
    }

    pub fn add_gratitude_entry_handler(&self) -> AddGratitudeEntryHandler {
        AddGratitudeEntryHandler::new(self.users.clone(), self.gratitude.clone())
    }

    pub fn list_gratitude_entries_handler(&self) -> ListGratitudeEntriesHandler {
        ListGratitudeEntriesHandler::new(self.gratitude.clone())
    }

    pub fn build_report_handler(&self) -> BuildReportHandler {
        BuildReportHandler::new(self.users.clone())
    }

    pub fn render_report_handler(&self) -> RenderReportHandler {
        RenderReportHandler::new(self.build_report_handler(), self.renderer.clone())
    }
}
