//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (identifiers, timestamps, errors)
//! - `assessment` - Emotion risk scoring, DASS-42 scoring and crisis detection
//! - `engagement` - Check-in streaks, XP levels and wellness tasks
//! - `user` - User profile aggregate, histories and the users collection
//! - `community` - Anonymous posts and gratitude journal
//! - `conversation` - Prompt context, support guidance and fallback replies
//! - `report` - Read-only report snapshot

pub mod assessment;
pub mod community;
pub mod conversation;
pub mod engagement;
pub mod foundation;
pub mod report;
pub mod user;
