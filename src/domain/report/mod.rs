//! Report module - read-only snapshot of a user's history for rendering.

mod snapshot;

pub use snapshot::{
    CompletedTask, DateRange, EmotionStatistics, EngagementSummary, ProfileSummary,
    ReportSnapshot, RECENT_CHAT_TURNS, RECENT_EMOTION_ENTRIES,
};
