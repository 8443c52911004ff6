//! Private gratitude journal entries.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GratitudeEntry {
    #[serde(rename = "entry")]
    pub text: String,
    #[serde(rename = "timestamp")]
    pub created_at: Timestamp,
}

impl GratitudeEntry {
    pub fn new(text: &str, now: Timestamp) -> Result<Self, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::empty_field("entry"));
        }
        Ok(Self {
            text: text.to_string(),
            created_at: now,
        })
    }
}
