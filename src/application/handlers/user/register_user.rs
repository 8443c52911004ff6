//! RegisterUserHandler - Command handler for creating accounts.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp, Username};
use crate::domain::user::{UserDirectory, UserProfile};
use crate::ports::{CollectionStore, UserStore};

/// Command to register a new user.
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub username: String,
    pub password: String,
    pub email: String,
}

/// Result of successful registration.
#[derive(Debug, Clone)]
pub struct RegisterUserResult {
    pub profile: UserProfile,
}

/// Handler for registering users.
pub struct RegisterUserHandler {
    users: Arc<dyn CollectionStore<UserDirectory>>,
}

impl RegisterUserHandler {
    pub fn new(users: Arc<dyn CollectionStore<UserDirectory>>) -> Self {
        Self { users }
    }

    pub async fn handle(
        &self,
        cmd: RegisterUserCommand,
        now: Timestamp,
    ) -> Result<RegisterUserResult, DomainError> {
        let username = Username::new(&cmd.username)?;
        let profile = self
            .users
            .register(username, &cmd.password, &cmd.email, now)
            .await?;

        tracing::info!(username = %profile.username, "User registered");
        Ok(RegisterUserResult { profile })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryStore;
    use crate::domain::foundation::ErrorCode;

    fn command(username: &str) -> RegisterUserCommand {
        RegisterUserCommand {
            username: username.to_string(),
            password: "s3cret".to_string(),
            email: "someone@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn registers_zeroed_profile() {
        let store = Arc::new(InMemoryStore::<UserDirectory>::new());
        let handler = RegisterUserHandler::new(store.clone());
        let now = Timestamp::parse("2024-03-01T12:00:00Z").unwrap();

        let result = handler.handle(command("  river "), now).await.unwrap();

        assert_eq!(result.profile.username.as_str(), "river");
        assert_eq!(result.profile.analysis_count, 0);
        assert!(!result.profile.dass_completed);
        assert_eq!(result.profile.last_analysis_at(), now.minus_hours(5));
        assert_eq!(store.snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let store = Arc::new(InMemoryStore::<UserDirectory>::new());
        let handler = RegisterUserHandler::new(store);
        let now = Timestamp::now();

        handler.handle(command("river"), now).await.unwrap();
        let err = handler.handle(command("river"), now).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::DuplicateUser);
    }

    #[tokio::test]
    async fn blank_username_is_rejected() {
        let handler = RegisterUserHandler::new(Arc::new(InMemoryStore::<UserDirectory>::new()));
        let err = handler.handle(command("   "), Timestamp::now()).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn email_without_at_is_rejected() {
        let handler = RegisterUserHandler::new(Arc::new(InMemoryStore::<UserDirectory>::new()));
        let mut cmd = command("river");
        cmd.email = "not-an-email".to_string();
        let err = handler.handle(cmd, Timestamp::now()).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }
}
