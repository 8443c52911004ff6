//! ClearHistoryHandler / ClearConversationHandler - history resets.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Username};
use crate::domain::user::UserDirectory;
use crate::ports::{CollectionStore, UserStore};

/// Command to clear a user's emotion and chat history.
#[derive(Debug, Clone)]
pub struct ClearHistoryCommand {
    pub username: String,
}

/// Clears emotion and chat history and resets the analysis counter.
///
/// DASS history, streak and engagement are untouched. Idempotent.
pub struct ClearHistoryHandler {
    users: Arc<dyn CollectionStore<UserDirectory>>,
}

impl ClearHistoryHandler {
    pub fn new(users: Arc<dyn CollectionStore<UserDirectory>>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: ClearHistoryCommand) -> Result<(), DomainError> {
        let username = Username::new(&cmd.username)?;
        self.users
            .with_user(&username, |profile| {
                profile.clear_history();
                Ok(())
            })
            .await?;

        tracing::info!(username = %username, "History cleared");
        Ok(())
    }
}

/// Command to clear only the chat transcript.
#[derive(Debug, Clone)]
pub struct ClearConversationCommand {
    pub username: String,
}

/// Clears chat history only.
pub struct ClearConversationHandler {
    users: Arc<dyn CollectionStore<UserDirectory>>,
}

impl ClearConversationHandler {
    pub fn new(users: Arc<dyn CollectionStore<UserDirectory>>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: ClearConversationCommand) -> Result<(), DomainError> {
        let username = Username::new(&cmd.username)?;
        self.users
            .with_user(&username, |profile| {
                profile.clear_conversation();
                Ok(())
            })
            .await?;

        tracing::debug!(username = %username, "Conversation cleared");
        Ok(())
    }
}
