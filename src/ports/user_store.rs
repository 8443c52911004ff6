//! User State Store - user-centric operations over the users collection.

use async_trait::async_trait;

use super::{CollectionStore, CollectionStoreExt, Loaded, StoreError};
use crate::domain::foundation::{DomainError, Timestamp, Username};
use crate::domain::user::{UserDirectory, UserProfile};

/// Operations on individual profiles, available on every users collection store.
#[async_trait]
pub trait UserStore: CollectionStore<UserDirectory> {
    /// Atomically load one profile, transform it, and persist the collection.
    ///
    /// # Errors
    /// `NotFound` when the user does not exist; whatever `f` returns otherwise.
    async fn with_user<R, F>(&self, username: &Username, f: F) -> Result<R, DomainError>
    where
        R: Send,
        F: FnOnce(&mut UserProfile) -> Result<R, DomainError> + Send;

    /// Snapshot of a single profile without taking the write lock.
    async fn find_user(&self, username: &Username) -> Result<Option<UserProfile>, StoreError>;

    /// Register a new user with a zeroed profile.
    async fn register(
        &self,
        username: Username,
        password: &str,
        email: &str,
        now: Timestamp,
    ) -> Result<UserProfile, DomainError>;

    /// Verify credentials, stamp `last_login_at`, and report whether the
    /// questionnaire has been completed.
    async fn authenticate(
        &self,
        username: &Username,
        password: &str,
        now: Timestamp,
    ) -> Result<bool, DomainError>;
}

#[async_trait]
impl<S> UserStore for S
where
    S: CollectionStore<UserDirectory> + ?Sized,
{
    async fn with_user<R, F>(&self, username: &Username, f: F) -> Result<R, DomainError>
    where
        R: Send,
        F: FnOnce(&mut UserProfile) -> Result<R, DomainError> + Send,
    {
        self.with_collection(move |users: &mut UserDirectory| f(users.require_mut(username)?))
            .await
    }

    async fn find_user(&self, username: &Username) -> Result<Option<UserProfile>, StoreError> {
        let Loaded { value, .. } = self.load().await?;
        Ok(value.get(username).cloned())
    }

    async fn register(
        &self,
        username: Username,
        password: &str,
        email: &str,
        now: Timestamp,
    ) -> Result<UserProfile, DomainError> {
        self.with_collection(move |users: &mut UserDirectory| {
            users.register(username, password, email, now).cloned()
        })
        .await
    }

    async fn authenticate(
        &self,
        username: &Username,
        password: &str,
        now: Timestamp,
    ) -> Result<bool, DomainError> {
        self.with_collection(move |users: &mut UserDirectory| {
            users.authenticate(username, password, now)
        })
        .await
    }
}
