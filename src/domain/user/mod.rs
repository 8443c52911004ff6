//! User module - profile aggregate, histories and credentials.
//!
//! # Domain Invariants
//!
//! 1. Usernames are unique within the user directory
//! 2. `analysis_count` only resets through an explicit history clear
//! 3. Emotion, chat and DASS histories are append-only otherwise
//! 4. `level == xp / 100 + 1` after every engagement mutation

mod credentials;
mod directory;
mod history;
mod profile;

pub use credentials::CredentialDigest;
pub use directory::UserDirectory;
pub use history::{ChatRole, ChatTurn, EmotionLogEntry, Origin};
pub use profile::{validate_email, UserProfile, INITIAL_ANALYSIS_OFFSET_HOURS};
