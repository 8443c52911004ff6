//! CheckStalenessHandler - Query whether a check-in reminder is due.

use chrono::Duration;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp, Username};
use crate::domain::user::UserDirectory;
use crate::ports::{CollectionStore, UserStore};

/// Default hours of inactivity before a reminder is due.
pub const DEFAULT_STALENESS_HOURS: i64 = 4;

/// Query for a user's staleness.
#[derive(Debug, Clone)]
pub struct CheckStalenessQuery {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StalenessStatus {
    pub is_stale: bool,
    pub last_analysis_at: Timestamp,
    /// Whole hours since the last analysis (never negative).
    pub hours_since: i64,
}

/// Read-only handler; never writes.
pub struct CheckStalenessHandler {
    users: Arc<dyn CollectionStore<UserDirectory>>,
    threshold: Duration,
}

impl CheckStalenessHandler {
    pub fn new(users: Arc<dyn CollectionStore<UserDirectory>>) -> Self {
        Self {
            users,
            threshold: Duration::hours(DEFAULT_STALENESS_HOURS),
        }
    }

    pub fn with_threshold(mut self, threshold: Duration) -> Self {
        self.threshold = threshold;
        self
    }

    pub async fn handle(
        &self,
        query: CheckStalenessQuery,
        now: Timestamp,
    ) -> Result<StalenessStatus, DomainError> {
        let username = Username::new(&query.username)?;
        let profile = self
            .users
            .find_user(&username)
            .await?
            .ok_or_else(|| DomainError::user_not_found(username.as_str()))?;

        let last_analysis_at = profile.last_analysis_at();
        Ok(StalenessStatus {
            is_stale: profile.is_stale(now, self.threshold),
            last_analysis_at,
            hours_since: now.duration_since(&last_analysis_at).num_hours().max(0),
        })
    }
}
