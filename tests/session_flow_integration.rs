//! Integration tests for a full user session over file-backed storage.
//!
//! These tests verify the end-to-end flow:
//! 1. Registration and login against the users file
//! 2. Direct analysis, questionnaire submission and chat with mock collaborators
//! 3. Engagement, community and gratitude operations
//! 4. Report rendering from the persisted state
//! 5. Everything survives reopening the data directory
//! 6. Bulk analysis reads nothing from and writes nothing to storage

use std::sync::Arc;

use chrono::NaiveDate;
use soul_engine::adapters::ai::{MockEmotionClassifier, MockResponseGenerator};
use soul_engine::application::{
    AddGratitudeEntryCommand, AnalyzeBatchQuery, AnalyzeTextCommand, AuthenticateUserCommand, BuildReportQuery,
    CheckStalenessQuery, ClearHistoryCommand, CompleteTaskCommand, CreatePostCommand,
    EngineState, ReactToPostCommand, RegisterUserCommand, SendChatMessageCommand,
    SubmitQuestionnaireCommand,
};
use soul_engine::config::{AppConfig, StorageConfig};
use soul_engine::domain::assessment::{
    CrisisLevel, QuestionnaireResponseSet, RiskTier, Severity,
};
use soul_engine::domain::community::Reaction;
use soul_engine::domain::engagement::CheckInOutcome;
use soul_engine::domain::foundation::{ErrorCode, Timestamp, Username};
use soul_engine::domain::user::UserDirectory;
use soul_engine::ports::{CollectionStore, UserStore};
use tempfile::TempDir;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn ts(s: &str) -> Timestamp {
    Timestamp::parse(s).unwrap()
}

fn config_in(dir: &TempDir) -> AppConfig {
    AppConfig {
        storage: StorageConfig::in_dir(dir.path()),
        ..AppConfig::default()
    }
}

fn engine(
    dir: &TempDir,
    classifier: MockEmotionClassifier,
    generator: MockResponseGenerator,
) -> EngineState {
    EngineState::with_file_stores(&config_in(dir), Arc::new(classifier), Arc::new(generator))
}

async fn register(state: &EngineState, username: &str, now: Timestamp) {
    state
        .register_user_handler()
        .handle(
            RegisterUserCommand {
                username: username.to_string(),
                password: "correct horse".to_string(),
                email: format!("{}@example.com", username),
            },
            now,
        )
        .await
        .unwrap();
}

fn analyze(text: &str) -> AnalyzeTextCommand {
    AnalyzeTextCommand {
        username: "river".to_string(),
        text: text.to_string(),
        top_k: None,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn full_session_persists_across_reopen() {
    let dir = TempDir::new().unwrap();
    let classifier = MockEmotionClassifier::new()
        .with_predictions(vec![("sadness", 0.6), ("nervousness", 0.3), ("joy", 0.1)])
        .with_predictions(vec![("joy", 0.9)]);
    let generator = MockResponseGenerator::new();
    let state = engine(&dir, classifier, generator);

    register(&state, "river", ts("2024-03-01T08:00:00Z")).await;

    let login = state
        .authenticate_user_handler()
        .handle(
            AuthenticateUserCommand {
                username: "river".to_string(),
                password: "correct horse".to_string(),
            },
            ts("2024-03-01T08:05:00Z"),
        )
        .await
        .unwrap();
    assert!(!login.result.unwrap().dass_completed);

    let first = state
        .analyze_text_handler()
        .handle(analyze("I feel low today"), ts("2024-03-01T09:00:00Z"))
        .await
        .unwrap();
    assert_eq!(first.check_in, CheckInOutcome::Started);
    assert!(first.risk_score().value() > 50.0);

    let second = state
        .analyze_text_handler()
        .handle(analyze("Better after a walk"), ts("2024-03-02T09:00:00Z"))
        .await
        .unwrap();
    assert_eq!(second.check_in, CheckInOutcome::Extended);
    assert_eq!(second.streak_count, 2);

    let responses = QuestionnaireResponseSet::new(vec![Some(1); 42]).unwrap();
    let dass = state
        .submit_questionnaire_handler()
        .handle(
            SubmitQuestionnaireCommand {
                username: "river".to_string(),
                responses,
            },
            ts("2024-03-02T10:00:00Z"),
        )
        .await
        .unwrap();
    assert!(dass.overall_severity >= Severity::Normal);

    let chat = state
        .send_chat_message_handler()
        .handle(
            SendChatMessageCommand {
                username: "river".to_string(),
                message: "thanks for listening".to_string(),
            },
            ts("2024-03-02T11:00:00Z"),
        )
        .await
        .unwrap();
    assert!(!chat.used_fallback);

    state
        .complete_task_handler()
        .handle(
            CompleteTaskCommand {
                username: "river".to_string(),
                task_id: "task_water".to_string(),
            },
            ts("2024-03-02T12:00:00Z"),
        )
        .await
        .unwrap();

    // Reopen the same data directory with fresh adapters.
    let reopened = engine(&dir, MockEmotionClassifier::new(), MockResponseGenerator::new());
    let river = Username::new("river").unwrap();
    let profile = reopened.users.find_user(&river).await.unwrap().unwrap();

    assert_eq!(profile.analysis_count, 3);
    assert_eq!(profile.emotion_history.len(), 3);
    assert_eq!(profile.chat_history.len(), 2);
    assert_eq!(profile.dass_history.len(), 1);
    assert!(profile.dass_completed);
    assert_eq!(profile.streak.count, 2);
    assert_eq!(profile.streak.longest, 2);
    assert_eq!(profile.engagement.xp, 20);
    assert_eq!(profile.last_login_at, Some(ts("2024-03-01T08:05:00Z")));

    let report = reopened
        .render_report_handler()
        .handle(
            BuildReportQuery {
                username: "river".to_string(),
                from: Some(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()),
                to: None,
            },
            ts("2024-03-03T00:00:00Z"),
        )
        .await
        .unwrap();
    let text = String::from_utf8(report.bytes).unwrap();
    assert!(text.contains("**Analyses:** 2"));
    assert!(text.contains("Drink a glass of water mindfully"));
}

#[tokio::test]
async fn clear_history_then_staleness() {
    let dir = TempDir::new().unwrap();
    let state = engine(&dir, MockEmotionClassifier::new(), MockResponseGenerator::new());
    register(&state, "river", ts("2024-03-01T08:00:00Z")).await;

    state
        .analyze_text_handler()
        .handle(analyze("just checking in"), ts("2024-03-01T09:00:00Z"))
        .await
        .unwrap();

    let staleness = state.check_staleness_handler();
    let query = || CheckStalenessQuery {
        username: "river".to_string(),
    };
    assert!(!staleness.handle(query(), ts("2024-03-01T12:00:00Z")).await.unwrap().is_stale);
    assert!(staleness.handle(query(), ts("2024-03-01T13:30:00Z")).await.unwrap().is_stale);

    let clear = state.clear_history_handler();
    let cmd = ClearHistoryCommand {
        username: "river".to_string(),
    };
    clear.handle(cmd.clone()).await.unwrap();
    let once = state.users.load().await.unwrap().value;
    clear.handle(cmd).await.unwrap();
    let twice = state.users.load().await.unwrap().value;

    assert_eq!(once, twice);
    let river = Username::new("river").unwrap();
    let profile = twice.get(&river).unwrap();
    assert_eq!(profile.analysis_count, 0);
    assert_eq!(profile.streak.count, 1);
}

#[tokio::test]
async fn crisis_message_with_failing_collaborators_still_answers() {
    use soul_engine::ports::{ClassifierError, GeneratorError};

    let dir = TempDir::new().unwrap();
    let state = engine(
        &dir,
        MockEmotionClassifier::new().with_error(ClassifierError::Timeout { timeout_secs: 30 }),
        MockResponseGenerator::new().with_error(GeneratorError::Unavailable("offline".into())),
    );
    register(&state, "river", ts("2024-03-01T08:00:00Z")).await;

    let result = state
        .send_chat_message_handler()
        .handle(
            SendChatMessageCommand {
                username: "river".to_string(),
                message: "I want to end it all".to_string(),
            },
            ts("2024-03-01T09:00:00Z"),
        )
        .await
        .unwrap();

    assert_eq!(result.crisis_level, CrisisLevel::Critical);
    assert!(result.classifier_unavailable);
    assert!(result.used_fallback);
    assert!(result.reply.contains("14416"));
}

#[tokio::test]
async fn community_and_gratitude_use_separate_files() {
    let dir = TempDir::new().unwrap();
    let state = engine(&dir, MockEmotionClassifier::new(), MockResponseGenerator::new());
    register(&state, "river", ts("2024-03-01T08:00:00Z")).await;

    let post = state
        .create_post_handler()
        .handle(
            CreatePostCommand {
                text: "Small wins count".to_string(),
            },
            ts("2024-03-01T09:00:00Z"),
        )
        .await
        .unwrap();
    state
        .react_to_post_handler()
        .handle(ReactToPostCommand {
            post_id: post.id,
            reaction: Reaction::Heart,
        })
        .await
        .unwrap();
    let gratitude = state
        .add_gratitude_entry_handler()
        .handle(
            AddGratitudeEntryCommand {
                username: "river".to_string(),
                text: "a quiet morning".to_string(),
            },
            ts("2024-03-01T10:00:00Z"),
        )
        .await
        .unwrap();
    assert_eq!(gratitude.xp, 20);

    let storage = StorageConfig::in_dir(dir.path());
    assert!(storage.users_path().exists());
    assert!(storage.posts_path().exists());
    assert!(storage.gratitude_path().exists());

    let posts: serde_json::Value =
        serde_json::from_slice(&std::fs::read(storage.posts_path()).unwrap()).unwrap();
    assert_eq!(posts[0]["reactions"]["❤️"], 1);
    assert_eq!(posts[0]["reactions"]["🌱"], 0);

    let listed = state.list_posts_handler().handle().await.unwrap();
    assert_eq!(listed[0].count(Reaction::Heart), 1);
}

#[tokio::test]
async fn duplicate_registration_and_bad_password() {
    let dir = TempDir::new().unwrap();
    let state = engine(&dir, MockEmotionClassifier::new(), MockResponseGenerator::new());
    let now = ts("2024-03-01T08:00:00Z");
    register(&state, "river", now).await;

    let err = state
        .register_user_handler()
        .handle(
            RegisterUserCommand {
                username: "river".to_string(),
                password: "other".to_string(),
                email: "x@example.com".to_string(),
            },
            now,
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::DuplicateUser);

    let outcome = state
        .authenticate_user_handler()
        .handle(
            AuthenticateUserCommand {
                username: "river".to_string(),
                password: "wrong".to_string(),
            },
            now,
        )
        .await
        .unwrap();
    assert_eq!(outcome.result.unwrap_err().code(), ErrorCode::InvalidCredential);

    let directory: UserDirectory = state.users.load().await.unwrap().value;
    assert_eq!(directory.len(), 1);
}

#[tokio::test]
async fn bulk_analysis_leaves_storage_untouched() {
    let dir = TempDir::new().unwrap();
    let state = engine(
        &dir,
        MockEmotionClassifier::new()
            .with_predictions(vec![("fear", 0.8)])
            .with_predictions(vec![("optimism", 0.6)]),
        MockResponseGenerator::new(),
    );

    let result = state
        .analyze_batch_handler()
        .handle(AnalyzeBatchQuery {
            texts: vec![
                "can't sleep before the exam".to_string(),
                "\n".to_string(),
                "ready for tomorrow".to_string(),
            ],
            top_k: None,
        })
        .await
        .unwrap();

    assert_eq!(result.summary.scored, 2);
    assert_eq!(result.summary.skipped, 1);
    assert_eq!(result.summary.tier_distribution.get(&RiskTier::High), Some(&1));
    assert_eq!(result.summary.high_risk_count, 1);

    let storage = StorageConfig::in_dir(dir.path());
    assert!(!storage.users_path().exists());
    assert!(!storage.posts_path().exists());
}
