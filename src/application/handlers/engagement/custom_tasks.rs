//! AddCustomTaskHandler / RemoveCustomTaskHandler - user-defined tasks.

use std::sync::Arc;

use crate::domain::engagement::CustomTask;
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, Username};
use crate::domain::user::UserDirectory;
use crate::ports::{CollectionStore, UserStore};

#[derive(Debug, Clone)]
pub struct AddCustomTaskCommand {
    pub username: String,
    pub label: String,
    pub xp: u32,
}

/// Adds a custom task with a reward between 10 and 100 XP.
pub struct AddCustomTaskHandler {
    users: Arc<dyn CollectionStore<UserDirectory>>,
}

impl AddCustomTaskHandler {
    pub fn new(users: Arc<dyn CollectionStore<UserDirectory>>) -> Self {
        Self { users }
    }

    pub async fn handle(
        &self,
        cmd: AddCustomTaskCommand,
        now: Timestamp,
    ) -> Result<CustomTask, DomainError> {
        let username = Username::new(&cmd.username)?;
        let task = CustomTask::new(&cmd.label, cmd.xp, now)?;
        self.users
            .with_user(&username, move |profile| {
                Ok(profile.engagement.add_custom_task(task).clone())
            })
            .await
    }
}

#[derive(Debug, Clone)]
pub struct RemoveCustomTaskCommand {
    pub username: String,
    pub task_id: String,
}

/// Removes a custom task. XP already earned from it stays.
pub struct RemoveCustomTaskHandler {
    users: Arc<dyn CollectionStore<UserDirectory>>,
}

impl RemoveCustomTaskHandler {
    pub fn new(users: Arc<dyn CollectionStore<UserDirectory>>) -> Self {
        Self { users }
    }

    /// # Errors
    /// `NotFound` for an unknown user or task id.
    pub async fn handle(&self, cmd: RemoveCustomTaskCommand) -> Result<CustomTask, DomainError> {
        let username = Username::new(&cmd.username)?;
        let task_id = cmd.task_id;
        self.users
            .with_user(&username, move |profile| {
                profile.engagement.remove_custom_task(&task_id).ok_or_else(|| {
                    DomainError::new(
                        ErrorCode::NotFound,
                        format!("Custom task '{}' not found", task_id),
                    )
                })
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryStore;
    use crate::application::handlers::engagement::{CompleteTaskCommand, CompleteTaskHandler};

    async fn users() -> Arc<InMemoryStore<UserDirectory>> {
        let store = Arc::new(InMemoryStore::<UserDirectory>::new());
        store
            .register(Username::new("river").unwrap(), "pw", "r@example.com", Timestamp::now())
            .await
            .unwrap();
        store
    }

    fn add(label: &str, xp: u32) -> AddCustomTaskCommand {
        AddCustomTaskCommand {
            username: "river".to_string(),
            label: label.to_string(),
            xp,
        }
    }

    #[tokio::test]
    async fn removing_task_keeps_earned_xp() {
        let store = users().await;
        let task = AddCustomTaskHandler::new(store.clone())
            .handle(add("Stretch", 30), Timestamp::now())
            .await
            .unwrap();
        assert!(task.id.starts_with("custom_"));

        CompleteTaskHandler::new(store.clone())
            .handle(
                CompleteTaskCommand {
                    username: "river".to_string(),
                    task_id: task.id.clone(),
                },
                Timestamp::now(),
            )
            .await
            .unwrap();

        let removed = RemoveCustomTaskHandler::new(store.clone())
            .handle(RemoveCustomTaskCommand {
                username: "river".to_string(),
                task_id: task.id.clone(),
            })
            .await
            .unwrap();
        assert_eq!(removed.label, "Stretch");

        let river = Username::new("river").unwrap();
        let directory = store.snapshot().await;
        let engagement = &directory.get(&river).unwrap().engagement;
        assert!(engagement.custom_tasks.is_empty());
        assert_eq!(engagement.xp, 30);
    }

    #[tokio::test]
    async fn out_of_range_reward_is_rejected() {
        let handler = AddCustomTaskHandler::new(users().await);
        for xp in [9, 101] {
            let err = handler.handle(add("Nap", xp), Timestamp::now()).await.unwrap_err();
            assert_eq!(err.code(), ErrorCode::ValidationFailed);
        }
    }

    #[tokio::test]
    async fn removing_unknown_task_is_not_found() {
        let err = RemoveCustomTaskHandler::new(users().await)
            .handle(RemoveCustomTaskCommand {
                username: "river".to_string(),
                task_id: "custom_missing".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
