//! UserProfile aggregate: everything persisted per user.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::{ChatTurn, CredentialDigest, EmotionLogEntry};
use crate::domain::assessment::DassResult;
use crate::domain::engagement::{CheckInOutcome, Engagement, Streak};
use crate::domain::foundation::{Timestamp, Username, ValidationError};

/// Hours between registration and the implied "previous analysis".
///
/// New users are considered stale straight away.
pub const INITIAL_ANALYSIS_OFFSET_HOURS: i64 = 5;

/// Validated contact email.
pub fn validate_email(email: &str) -> Result<String, ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::empty_field("email"));
    }
    if !email.contains('@') {
        return Err(ValidationError::invalid_format("email", "must contain '@'"));
    }
    Ok(email.to_string())
}

/// Durable per-user state.
///
/// Histories are append-only; only the owner-initiated clear operations
/// remove entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: Username,
    #[serde(rename = "password")]
    pub credential_digest: CredentialDigest,
    pub email: String,
    #[serde(rename = "registered_date")]
    pub registered_at: Timestamp,
    #[serde(rename = "last_login", default)]
    pub last_login_at: Option<Timestamp>,
    #[serde(default)]
    pub dass_completed: bool,
    #[serde(default)]
    pub dass_history: Vec<DassResult>,
    #[serde(default)]
    pub emotion_history: Vec<EmotionLogEntry>,
    #[serde(default)]
    pub chat_history: Vec<ChatTurn>,
    #[serde(default)]
    pub analysis_count: u32,
    #[serde(rename = "last_analysis_time", default)]
    last_analysis_at: Option<Timestamp>,
    #[serde(flatten)]
    pub streak: Streak,
    #[serde(rename = "mind_gym", default)]
    pub engagement: Engagement,
}

impl UserProfile {
    /// Zeroed profile for a newly registered user.
    pub fn new(
        username: Username,
        credential_digest: CredentialDigest,
        email: String,
        now: Timestamp,
    ) -> Self {
        Self {
            username,
            credential_digest,
            email,
            registered_at: now,
            last_login_at: None,
            dass_completed: false,
            dass_history: Vec::new(),
            emotion_history: Vec::new(),
            chat_history: Vec::new(),
            analysis_count: 0,
            last_analysis_at: Some(now.minus_hours(INITIAL_ANALYSIS_OFFSET_HOURS)),
            streak: Streak::default(),
            engagement: Engagement::default(),
        }
    }

    /// Time of the last analysis, falling back to 5 hours before registration.
    pub fn last_analysis_at(&self) -> Timestamp {
        self.last_analysis_at.unwrap_or_else(|| {
            self.registered_at
                .minus_hours(INITIAL_ANALYSIS_OFFSET_HOURS)
        })
    }

    /// Whether more than `threshold` has passed since the last analysis.
    pub fn is_stale(&self, now: Timestamp, threshold: Duration) -> bool {
        now.duration_since(&self.last_analysis_at()) > threshold
    }

    pub fn record_login(&mut self, now: Timestamp) {
        self.last_login_at = Some(now);
    }

    /// Appends an emotion log entry and counts it as activity.
    pub fn record_emotion(&mut self, entry: EmotionLogEntry) {
        self.last_analysis_at = Some(entry.timestamp);
        self.analysis_count += 1;
        self.emotion_history.push(entry);
    }

    /// Counts a chat exchange as activity without an emotion log entry.
    pub fn touch_activity(&mut self, now: Timestamp) {
        self.last_analysis_at = Some(now);
        self.analysis_count += 1;
    }

    pub fn record_dass(&mut self, result: DassResult) {
        self.dass_history.push(result);
        self.dass_completed = true;
    }

    pub fn latest_dass(&self) -> Option<&DassResult> {
        self.dass_history.last()
    }

    /// Check-ins dated before registration are ignored, which keeps the
    /// streak within the days since registration.
    pub fn check_in(&mut self, now: Timestamp) -> CheckInOutcome {
        if now.date() < self.registered_at.date() {
            return CheckInOutcome::Unchanged;
        }
        self.streak.check_in(now.date())
    }

    /// Clears emotion and chat history and resets the analysis counter.
    pub fn clear_history(&mut self) {
        self.emotion_history.clear();
        self.chat_history.clear();
        self.analysis_count = 0;
    }

    pub fn clear_conversation(&mut self) {
        self.chat_history.clear();
    }
}
