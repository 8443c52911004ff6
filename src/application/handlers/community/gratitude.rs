//! Gratitude journal handlers.

use std::sync::Arc;

use crate::domain::community::{GratitudeEntry, GratitudeJournal};
use crate::domain::engagement::GRATITUDE_ENTRY_XP;
use crate::domain::foundation::{DomainError, Timestamp, Username};
use crate::domain::user::UserDirectory;
use crate::ports::{CollectionStore, CollectionStoreExt, UserStore};

#[derive(Debug, Clone)]
pub struct AddGratitudeEntryCommand {
    pub username: String,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct AddGratitudeEntryResult {
    pub entry: GratitudeEntry,
    pub xp: u32,
    pub level: u32,
}

/// Writes a journal entry and awards its XP to the author.
pub struct AddGratitudeEntryHandler {
    users: Arc<dyn CollectionStore<UserDirectory>>,
    journal: Arc<dyn CollectionStore<GratitudeJournal>>,
}

impl AddGratitudeEntryHandler {
    pub fn new(
        users: Arc<dyn CollectionStore<UserDirectory>>,
        journal: Arc<dyn CollectionStore<GratitudeJournal>>,
    ) -> Self {
        Self { users, journal }
    }

    /// The author must exist. The entry is written first and the XP award
    /// second, so a failed journal write never leaves unearned XP behind.
    ///
    /// # Errors
    /// `ValidationFailed` for blank text, `NotFound` for an unknown user.
    pub async fn handle(
        &self,
        cmd: AddGratitudeEntryCommand,
        now: Timestamp,
    ) -> Result<AddGratitudeEntryResult, DomainError> {
        let username = Username::new(&cmd.username)?;
        let entry = GratitudeEntry::new(&cmd.text, now)?;

        if self.users.find_user(&username).await?.is_none() {
            return Err(DomainError::user_not_found(username.as_str()));
        }

        let stored = entry.clone();
        let author = username.clone();
        self.journal
            .with_collection(move |journal: &mut GratitudeJournal| {
                journal.add(author, stored);
                Ok(())
            })
            .await?;

        let (xp, level) = self
            .users
            .with_user(&username, |profile| {
                profile.engagement.add_xp(GRATITUDE_ENTRY_XP);
                Ok((profile.engagement.xp, profile.engagement.level))
            })
            .await?;

        tracing::debug!(username = %username, "Gratitude entry added");
        Ok(AddGratitudeEntryResult { entry, xp, level })
    }
}

#[derive(Debug, Clone)]
pub struct ListGratitudeEntriesQuery {
    pub username: String,
}

/// Lists a user's entries, newest first.
pub struct ListGratitudeEntriesHandler {
    journal: Arc<dyn CollectionStore<GratitudeJournal>>,
}

impl ListGratitudeEntriesHandler {
    pub fn new(journal: Arc<dyn CollectionStore<GratitudeJournal>>) -> Self {
        Self { journal }
    }

    pub async fn handle(
        &self,
        query: ListGratitudeEntriesQuery,
    ) -> Result<Vec<GratitudeEntry>, DomainError> {
        let username = Username::new(&query.username)?;
        let loaded = self.journal.load().await?;
        if let Some(warning) = loaded.warning() {
            tracing::warn!(error = %warning, "Gratitude journal recovered from corruption");
        }
        Ok(loaded
            .value
            .entries_for(&username)
            .iter()
            .rev()
            .cloned()
            .collect())
    }
}
