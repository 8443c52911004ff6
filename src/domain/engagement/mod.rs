//! Engagement module - streaks, XP and wellness tasks.

mod progress;
mod streak;

pub use progress::{
    CustomTask, DailyTask, Engagement, TaskCompletion, BREATHING_EXERCISE_XP,
    CUSTOM_TASK_XP_RANGE, DAILY_TASKS, DAILY_TASK_XP, GRATITUDE_ENTRY_XP, XP_PER_LEVEL,
};
pub use streak::{CheckInOutcome, Streak};
