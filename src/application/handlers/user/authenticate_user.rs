//! AuthenticateUserHandler - Verifies credentials and stamps the login time.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp, Username};
use crate::domain::user::UserDirectory;
use crate::ports::{CollectionStore, UserStore};

/// Command to log a user in.
#[derive(Debug, Clone)]
pub struct AuthenticateUserCommand {
    pub username: String,
    pub password: String,
}

/// Result of a login attempt that passed verification.
#[derive(Debug, Clone)]
pub struct AuthenticateUserResult {
    pub username: Username,
    /// Whether the DASS-42 questionnaire has been completed at least once.
    pub dass_completed: bool,
}

/// Outcome of a login attempt, including any storage recovery that happened
/// while reading the user directory.
#[derive(Debug, Clone)]
pub struct AuthenticateUserOutcome {
    pub result: Result<AuthenticateUserResult, DomainError>,
    /// `StorageCorrupted` warning when the users file had to be quarantined.
    pub warning: Option<DomainError>,
}

/// Handler for logging users in.
pub struct AuthenticateUserHandler {
    users: Arc<dyn CollectionStore<UserDirectory>>,
}

impl AuthenticateUserHandler {
    pub fn new(users: Arc<dyn CollectionStore<UserDirectory>>) -> Self {
        Self { users }
    }

    /// Authenticates a user.
    ///
    /// The users collection is loaded first so a corrupt file is quarantined
    /// and reported even though the attempt itself then fails with `NotFound`.
    ///
    /// # Errors
    /// Storage I/O failures are returned directly; credential failures are
    /// carried in the outcome alongside any recovery warning.
    pub async fn handle(
        &self,
        cmd: AuthenticateUserCommand,
        now: Timestamp,
    ) -> Result<AuthenticateUserOutcome, DomainError> {
        let warning = self.users.load().await?.warning();
        if let Some(warning) = &warning {
            tracing::warn!(error = %warning, "User directory recovered from corruption");
        }

        let result = self.authenticate(&cmd, now).await;
        match &result {
            Ok(ok) => tracing::info!(username = %ok.username, "User logged in"),
            Err(err) => tracing::debug!(code = %err.code(), "Login rejected"),
        }

        Ok(AuthenticateUserOutcome { result, warning })
    }

    async fn authenticate(
        &self,
        cmd: &AuthenticateUserCommand,
        now: Timestamp,
    ) -> Result<AuthenticateUserResult, DomainError> {
        let username = Username::new(&cmd.username)?;
        let dass_completed = self
            .users
            .authenticate(&username, &cmd.password, now)
            .await?;
        Ok(AuthenticateUserResult {
            username,
            dass_completed,
        })
    }
}
