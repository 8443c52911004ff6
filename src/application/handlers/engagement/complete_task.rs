//! CompleteTaskHandler - Marks a wellness task done for today.

use std::sync::Arc;

use crate::domain::engagement::TaskCompletion;
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, Username};
use crate::domain::user::UserDirectory;
use crate::ports::{CollectionStore, UserStore};

/// Command to complete a built-in or custom task.
#[derive(Debug, Clone)]
pub struct CompleteTaskCommand {
    pub username: String,
    pub task_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteTaskResult {
    pub completion: TaskCompletion,
    pub xp: u32,
    pub level: u32,
}

pub struct CompleteTaskHandler {
    users: Arc<dyn CollectionStore<UserDirectory>>,
}

impl CompleteTaskHandler {
    pub fn new(users: Arc<dyn CollectionStore<UserDirectory>>) -> Self {
        Self { users }
    }

    /// Awards the task's XP at most once per calendar day.
    ///
    /// # Errors
    /// `NotFound` for an unknown user or task id.
    pub async fn handle(
        &self,
        cmd: CompleteTaskCommand,
        now: Timestamp,
    ) -> Result<CompleteTaskResult, DomainError> {
        let username = Username::new(&cmd.username)?;
        let task_id = cmd.task_id;
        let result = self
            .users
            .with_user(&username, move |profile| {
                let engagement = &mut profile.engagement;
                let completion = engagement.complete_task(&task_id, now.date()).ok_or_else(|| {
                    DomainError::new(ErrorCode::NotFound, format!("Unknown task '{}'", task_id))
                        .with_detail("task_id", task_id.clone())
                })?;
                Ok(CompleteTaskResult {
                    completion,
                    xp: engagement.xp,
                    level: engagement.level,
                })
            })
            .await?;

        tracing::debug!(username = %username, xp = result.xp, "Task completed");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryStore;
    use crate::domain::engagement::DAILY_TASK_XP;

    async fn users() -> Arc<InMemoryStore<UserDirectory>> {
        let store = Arc::new(InMemoryStore::<UserDirectory>::new());
        store
            .register(Username::new("river").unwrap(), "pw", "r@example.com", Timestamp::now())
            .await
            .unwrap();
        store
    }

    fn command(task_id: &str) -> CompleteTaskCommand {
        CompleteTaskCommand {
            username: "river".to_string(),
            task_id: task_id.to_string(),
        }
    }

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    #[tokio::test]
    async fn task_awards_once_per_day() {
        let handler = CompleteTaskHandler::new(users().await);

        let first = handler.handle(command("task_walk"), ts("2024-01-01T08:00:00Z")).await.unwrap();
        let again = handler.handle(command("task_walk"), ts("2024-01-01T20:00:00Z")).await.unwrap();
        let next_day = handler.handle(command("task_walk"), ts("2024-01-02T08:00:00Z")).await.unwrap();

        assert_eq!(first.completion, TaskCompletion::Awarded { xp: DAILY_TASK_XP });
        assert_eq!(again.completion, TaskCompletion::AlreadyCompletedToday);
        assert_eq!(again.xp, DAILY_TASK_XP);
        assert_eq!(next_day.xp, DAILY_TASK_XP * 2);
    }

    #[tokio::test]
    async fn unknown_task_is_not_found() {
        let handler = CompleteTaskHandler::new(users().await);
        let err = handler
            .handle(command("task_fly"), Timestamp::now())
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
