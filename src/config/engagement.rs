//! Engagement policy configuration

use chrono::Duration;
use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::assessment::SUBMISSION_THRESHOLD_PERCENT;

/// Thresholds for staleness reminders and questionnaire submission
#[derive(Debug, Clone, Deserialize)]
pub struct EngagementConfig {
    /// Hours without analysis before the user is considered stale
    #[serde(default = "default_staleness_hours")]
    pub staleness_hours: i64,

    /// Minimum questionnaire completion (percent) required to submit
    #[serde(default = "default_submission_threshold")]
    pub submission_threshold_percent: f64,
}

impl EngagementConfig {
    pub fn staleness(&self) -> Duration {
        Duration::hours(self.staleness_hours)
    }

    /// Validate engagement configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.staleness_hours <= 0 {
            return Err(ValidationError::InvalidStaleness);
        }
        if !(0.0..=100.0).contains(&self.submission_threshold_percent) {
            return Err(ValidationError::InvalidSubmissionThreshold);
        }
        Ok(())
    }
}

impl Default for EngagementConfig {
    fn default() -> Self {
        Self {
            staleness_hours: default_staleness_hours(),
            submission_threshold_percent: default_submission_threshold(),
        }
    }
}

fn default_staleness_hours() -> i64 {
    4
}

fn default_submission_threshold() -> f64 {
    SUBMISSION_THRESHOLD_PERCENT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engagement_defaults() {
        let config = EngagementConfig::default();
        assert_eq!(config.staleness(), Duration::hours(4));
        assert_eq!(config.submission_threshold_percent, 65.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_threshold_out_of_range() {
        let config = EngagementConfig {
            submission_threshold_percent: 120.0,
            ..EngagementConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidSubmissionThreshold)
        );
    }
}
