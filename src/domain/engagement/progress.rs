//! XP, level and wellness task progress.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::domain::foundation::{Timestamp, ValidationError};

/// XP needed per level.
pub const XP_PER_LEVEL: u32 = 100;

/// Reward for each built-in daily task.
pub const DAILY_TASK_XP: u32 = 20;

/// Reward for finishing a breathing exercise.
pub const BREATHING_EXERCISE_XP: u32 = 20;

/// Reward for writing a gratitude entry.
pub const GRATITUDE_ENTRY_XP: u32 = 20;

/// Allowed range for custom task rewards.
pub const CUSTOM_TASK_XP_RANGE: std::ops::RangeInclusive<u32> = 10..=100;

/// Built-in wellness task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTask {
    pub id: &'static str,
    pub label: &'static str,
    pub xp: u32,
}

pub const DAILY_TASKS: [DailyTask; 5] = [
    DailyTask { id: "task_break", label: "Take a 5-minute break", xp: DAILY_TASK_XP },
    DailyTask { id: "task_friend", label: "Talk to a friend or loved one", xp: DAILY_TASK_XP },
    DailyTask { id: "task_meditate", label: "Meditate for 3 minutes", xp: DAILY_TASK_XP },
    DailyTask { id: "task_walk", label: "Go for a short walk", xp: DAILY_TASK_XP },
    DailyTask { id: "task_water", label: "Drink a glass of water mindfully", xp: DAILY_TASK_XP },
];

/// User-defined wellness task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomTask {
    pub id: String,
    pub label: String,
    pub xp: u32,
    pub created_at: Timestamp,
}

impl CustomTask {
    pub fn new(label: &str, xp: u32, now: Timestamp) -> Result<Self, ValidationError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(ValidationError::empty_field("label"));
        }
        if !CUSTOM_TASK_XP_RANGE.contains(&xp) {
            return Err(ValidationError::out_of_range(
                "xp",
                *CUSTOM_TASK_XP_RANGE.start() as i64,
                *CUSTOM_TASK_XP_RANGE.end() as i64,
                xp as i64,
            ));
        }
        Ok(Self {
            id: format!("custom_{}", Uuid::new_v4().simple()),
            label: label.to_string(),
            xp,
            created_at: now,
        })
    }
}

/// Outcome of a task completion attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskCompletion {
    Awarded { xp: u32 },
    AlreadyCompletedToday,
}

/// Gamified progress sub-state of a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    #[serde(default)]
    pub xp: u32,
    #[serde(default = "first_level")]
    pub level: u32,
    #[serde(default)]
    pub completed_task_ids: BTreeSet<String>,
    #[serde(default)]
    pub custom_tasks: Vec<CustomTask>,
}

fn first_level() -> u32 {
    1
}

impl Default for Engagement {
    fn default() -> Self {
        Self {
            xp: 0,
            level: first_level(),
            completed_task_ids: BTreeSet::new(),
            custom_tasks: Vec::new(),
        }
    }
}

impl Engagement {
    pub fn level_for(xp: u32) -> u32 {
        xp / XP_PER_LEVEL + 1
    }

    /// Adds XP and recomputes the level. XP is never removed.
    pub fn add_xp(&mut self, amount: u32) {
        self.xp = self.xp.saturating_add(amount);
        self.level = Self::level_for(self.xp);
    }

    /// Completion record id for a task on a given day.
    pub fn completion_id(task_id: &str, day: NaiveDate) -> String {
        format!("{}_{}", task_id, day.format("%Y-%m-%d"))
    }

    /// Reward for a task id, built-in or custom.
    pub fn task_reward(&self, task_id: &str) -> Option<u32> {
        DAILY_TASKS
            .iter()
            .find(|t| t.id == task_id)
            .map(|t| t.xp)
            .or_else(|| {
                self.custom_tasks
                    .iter()
                    .find(|t| t.id == task_id)
                    .map(|t| t.xp)
            })
    }

    /// Marks a known task done for `day`, awarding XP once per day.
    ///
    /// Returns `None` when the task id is unknown.
    pub fn complete_task(&mut self, task_id: &str, day: NaiveDate) -> Option<TaskCompletion> {
        let xp = self.task_reward(task_id)?;
        if !self.completed_task_ids.insert(Self::completion_id(task_id, day)) {
            return Some(TaskCompletion::AlreadyCompletedToday);
        }
        self.add_xp(xp);
        Some(TaskCompletion::Awarded { xp })
    }

    pub fn is_completed(&self, task_id: &str, day: NaiveDate) -> bool {
        self.completed_task_ids
            .contains(&Self::completion_id(task_id, day))
    }

    pub fn add_custom_task(&mut self, task: CustomTask) -> &CustomTask {
        self.custom_tasks.push(task);
        &self.custom_tasks[self.custom_tasks.len() - 1]
    }

    /// Removes a custom task. Earned XP stays.
    pub fn remove_custom_task(&mut self, task_id: &str) -> Option<CustomTask> {
        let index = self.custom_tasks.iter().position(|t| t.id == task_id)?;
        Some(self.custom_tasks.remove(index))
    }

    /// Completion ids whose date suffix falls within `[from, to]`.
    pub fn completions_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<&str> {
        self.completed_task_ids
            .iter()
            .filter(|id| {
                id.rsplit_once('_')
                    .and_then(|(_, date)| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
                    .map(|d| d >= from && d <= to)
                    .unwrap_or(false)
            })
            .map(String::as_str)
            .collect()
    }
}
