//! BuildReportHandler - Read-only report snapshot for a user.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp, Username};
use crate::domain::report::{DateRange, ReportSnapshot};
use crate::domain::user::UserDirectory;
use crate::ports::{CollectionStore, UserStore};

/// Query for a report covering an inclusive date range.
#[derive(Debug, Clone)]
pub struct BuildReportQuery {
    pub username: String,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

pub struct BuildReportHandler {
    users: Arc<dyn CollectionStore<UserDirectory>>,
}

impl BuildReportHandler {
    pub fn new(users: Arc<dyn CollectionStore<UserDirectory>>) -> Self {
        Self { users }
    }

    /// # Errors
    /// `ValidationFailed` for an inverted range, `NotFound` for an unknown user.
    pub async fn handle(
        &self,
        query: BuildReportQuery,
        now: Timestamp,
    ) -> Result<ReportSnapshot, DomainError> {
        let username = Username::new(&query.username)?;
        let range = DateRange::new(query.from, query.to)?;
        let profile = self
            .users
            .find_user(&username)
            .await?
            .ok_or_else(|| DomainError::user_not_found(username.as_str()))?;

        Ok(ReportSnapshot::build(&profile, range, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryStore;
    use crate::domain::foundation::ErrorCode;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    async fn users() -> Arc<InMemoryStore<UserDirectory>> {
        let store = Arc::new(InMemoryStore::<UserDirectory>::new());
        store
            .register(Username::new("river").unwrap(), "pw", "r@example.com", Timestamp::now())
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn builds_snapshot_for_range() {
        let handler = BuildReportHandler::new(users().await);
        let snapshot = handler
            .handle(
                BuildReportQuery {
                    username: "river".to_string(),
                    from: Some(date("2024-01-01")),
                    to: Some(date("2024-01-31")),
                },
                Timestamp::now(),
            )
            .await
            .unwrap();
        assert_eq!(snapshot.profile.username, "river");
        assert_eq!(snapshot.range.from, Some(date("2024-01-01")));
        assert_eq!(snapshot.emotion_statistics.entry_count, 0);
    }

    #[tokio::test]
    async fn inverted_range_is_rejected() {
        let handler = BuildReportHandler::new(users().await);
        let err = handler
            .handle(
                BuildReportQuery {
                    username: "river".to_string(),
                    from: Some(date("2024-02-01")),
                    to: Some(date("2024-01-01")),
                },
                Timestamp::now(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }
}
