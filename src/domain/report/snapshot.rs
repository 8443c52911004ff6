//! Read-only report snapshot assembled from a user profile.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

use crate::domain::assessment::{DassResult, EmotionLabel, RiskScore, ELEVATED_SCORE};
use crate::domain::engagement::DAILY_TASKS;
use crate::domain::foundation::{Timestamp, ValidationError};
use crate::domain::user::{ChatTurn, EmotionLogEntry, UserProfile};

/// Most recent emotion entries included in a report.
pub const RECENT_EMOTION_ENTRIES: usize = 10;

/// Most recent chat turns included in a report.
pub const RECENT_CHAT_TURNS: usize = 20;

/// Inclusive calendar-date range. Open ends match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Self, ValidationError> {
        if let (Some(f), Some(t)) = (from, to) {
            if f > t {
                return Err(ValidationError::invalid_format(
                    "date_range",
                    "start date is after end date",
                ));
            }
        }
        Ok(Self { from, to })
    }

    pub fn all() -> Self {
        Self::default()
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |f| date >= f) && self.to.map_or(true, |t| date <= t)
    }

    pub fn contains(&self, ts: &Timestamp) -> bool {
        self.contains_date(ts.date())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSummary {
    pub username: String,
    pub email: String,
    pub registered_at: Timestamp,
    pub last_login_at: Option<Timestamp>,
    pub analysis_count: u32,
    pub dass_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionStatistics {
    pub entry_count: usize,
    pub average_risk: Option<RiskScore>,
    /// Entries with risk above the elevated threshold.
    pub high_risk_count: usize,
    pub most_common_emotion: Option<EmotionLabel>,
}

impl EmotionStatistics {
    fn from_entries(entries: &[&EmotionLogEntry]) -> Self {
        let entry_count = entries.len();
        let average_risk = if entry_count == 0 {
            None
        } else {
            let sum: f64 = entries.iter().map(|e| e.risk_score.value()).sum();
            Some(RiskScore::new(sum / entry_count as f64))
        };
        let high_risk_count = entries
            .iter()
            .filter(|e| e.risk_score.value() > ELEVATED_SCORE)
            .count();

        // Ties resolve to the emotion that became dominant first.
        let mut counts: HashMap<&EmotionLabel, (usize, usize)> = HashMap::new();
        for (order, entry) in entries.iter().enumerate() {
            if let Some(dominant) = entry.dominant() {
                counts.entry(&dominant.label).or_insert((0, order)).0 += 1;
            }
        }
        let most_common_emotion = counts
            .into_iter()
            .max_by(|(_, (ca, oa)), (_, (cb, ob))| ca.cmp(cb).then(ob.cmp(oa)))
            .map(|(label, _)| label.clone());

        Self {
            entry_count,
            average_risk,
            high_risk_count,
            most_common_emotion,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletedTask {
    pub task_id: String,
    pub label: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngagementSummary {
    pub xp: u32,
    pub level: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub tasks_completed: Vec<CompletedTask>,
}

/// Everything a report renderer needs, already filtered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSnapshot {
    pub generated_at: Timestamp,
    pub range: DateRange,
    pub profile: ProfileSummary,
    pub dass_results: Vec<DassResult>,
    pub latest_dass: Option<DassResult>,
    pub emotion_statistics: EmotionStatistics,
    pub recent_emotions: Vec<EmotionLogEntry>,
    pub recent_chat: Vec<ChatTurn>,
    pub engagement: EngagementSummary,
}

impl ReportSnapshot {
    pub fn build(profile: &UserProfile, range: DateRange, now: Timestamp) -> Self {
        let dass_results: Vec<DassResult> = profile
            .dass_history
            .iter()
            .filter(|r| range.contains(&r.timestamp))
            .cloned()
            .collect();
        let latest_dass = dass_results.last().cloned();

        let emotions: Vec<&EmotionLogEntry> = profile
            .emotion_history
            .iter()
            .filter(|e| range.contains(&e.timestamp))
            .collect();
        let emotion_statistics = EmotionStatistics::from_entries(&emotions);
        let recent_emotions = tail(&emotions, RECENT_EMOTION_ENTRIES)
            .iter()
            .map(|e| (*e).clone())
            .collect();

        let chat: Vec<&ChatTurn> = profile
            .chat_history
            .iter()
            .filter(|t| range.contains(&t.timestamp))
            .collect();
        let recent_chat = tail(&chat, RECENT_CHAT_TURNS)
            .iter()
            .map(|t| (*t).clone())
            .collect();

        let engagement = &profile.engagement;
        let from = range.from.unwrap_or(NaiveDate::MIN);
        let to = range.to.unwrap_or(NaiveDate::MAX);
        let tasks_completed = engagement
            .completions_between(from, to)
            .into_iter()
            .filter_map(|id| completed_task(profile, id))
            .collect();

        Self {
            generated_at: now,
            range,
            profile: ProfileSummary {
                username: profile.username.to_string(),
                email: profile.email.clone(),
                registered_at: profile.registered_at,
                last_login_at: profile.last_login_at,
                analysis_count: profile.analysis_count,
                dass_completed: profile.dass_completed,
            },
            dass_results,
            latest_dass,
            emotion_statistics,
            recent_emotions,
            recent_chat,
            engagement: EngagementSummary {
                xp: engagement.xp,
                level: engagement.level,
                current_streak: profile.streak.count,
                longest_streak: profile.streak.longest,
                tasks_completed,
            },
        }
    }
}

fn tail<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}

fn completed_task(profile: &UserProfile, completion_id: &str) -> Option<CompletedTask> {
    let (task_id, date) = completion_id.rsplit_once('_')?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let label = DAILY_TASKS
        .iter()
        .find(|t| t.id == task_id)
        .map(|t| t.label.to_string())
        .or_else(|| {
            profile
                .engagement
                .custom_tasks
                .iter()
                .find(|t| t.id == task_id)
                .map(|t| t.label.clone())
        })
        .unwrap_or_else(|| task_id.to_string());
    Some(CompletedTask {
        task_id: task_id.to_string(),
        label,
        date,
    })
}
