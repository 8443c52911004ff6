//! Anonymous community posts and their reactions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{PostId, Timestamp, ValidationError};

/// Supportive reaction a reader can leave on a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Reaction {
    #[serde(rename = "❤️")]
    Heart,
    #[serde(rename = "🌱")]
    Sprout,
    #[serde(rename = "💪")]
    Strength,
}

impl Reaction {
    pub const ALL: [Reaction; 3] = [Reaction::Heart, Reaction::Sprout, Reaction::Strength];

    pub fn symbol(&self) -> &'static str {
        match self {
            Reaction::Heart => "❤️",
            Reaction::Sprout => "🌱",
            Reaction::Strength => "💪",
        }
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Reaction {
    type Err = ValidationError;

    /// Accepts the emoji or its name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "❤️" | "❤" | "heart" => Ok(Reaction::Heart),
            "🌱" | "sprout" | "growth" => Ok(Reaction::Sprout),
            "💪" | "strength" => Ok(Reaction::Strength),
            other => Err(ValidationError::invalid_format(
                "reaction",
                format!("unknown reaction '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityPost {
    #[serde(default)]
    pub id: PostId,
    pub text: String,
    #[serde(rename = "timestamp")]
    pub created_at: Timestamp,
    #[serde(default = "zeroed_reactions")]
    pub reactions: BTreeMap<Reaction, u32>,
}

fn zeroed_reactions() -> BTreeMap<Reaction, u32> {
    Reaction::ALL.iter().map(|r| (*r, 0)).collect()
}

impl CommunityPost {
    /// Creates a post with every reaction count at zero.
    pub fn new(text: &str, now: Timestamp) -> Result<Self, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::empty_field("text"));
        }
        Ok(Self {
            id: PostId::new(),
            text: text.to_string(),
            created_at: now,
            reactions: zeroed_reactions(),
        })
    }

    pub fn react(&mut self, reaction: Reaction) -> u32 {
        let count = self.reactions.entry(reaction).or_insert(0);
        *count += 1;
        *count
    }

    pub fn count(&self, reaction: Reaction) -> u32 {
        self.reactions.get(&reaction).copied().unwrap_or(0)
    }
}
