//! Community module - anonymous posts and gratitude journal.

mod board;
mod gratitude;
mod post;

pub use board::{GratitudeJournal, PostBoard};
pub use gratitude::GratitudeEntry;
pub use post::{CommunityPost, Reaction};
