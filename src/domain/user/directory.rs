//! The users collection: every profile keyed by username.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{validate_email, CredentialDigest, UserProfile};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, Username};

/// Persisted as a JSON object keyed by username.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserDirectory(BTreeMap<Username, UserProfile>);

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, username: &Username) -> bool {
        self.0.contains_key(username)
    }

    pub fn get(&self, username: &Username) -> Option<&UserProfile> {
        self.0.get(username)
    }

    pub fn get_mut(&mut self, username: &Username) -> Option<&mut UserProfile> {
        self.0.get_mut(username)
    }

    /// Mutable access or `NotFound`.
    pub fn require_mut(&mut self, username: &Username) -> Result<&mut UserProfile, DomainError> {
        self.0
            .get_mut(username)
            .ok_or_else(|| DomainError::user_not_found(username.as_str()))
    }

    pub fn usernames(&self) -> impl Iterator<Item = &Username> {
        self.0.keys()
    }

    /// Adds a zeroed profile.
    ///
    /// # Errors
    /// `DuplicateUser` if the name is taken, `ValidationFailed` for bad input.
    pub fn register(
        &mut self,
        username: Username,
        password: &str,
        email: &str,
        now: Timestamp,
    ) -> Result<&UserProfile, DomainError> {
        if self.0.contains_key(&username) {
            return Err(DomainError::new(
                ErrorCode::DuplicateUser,
                format!("Username '{}' already exists", username),
            )
            .with_detail("username", username.as_str()));
        }
        let digest = CredentialDigest::from_password(password)?;
        let email = validate_email(email)?;
        let profile = UserProfile::new(username.clone(), digest, email, now);
        Ok(self.0.entry(username).or_insert(profile))
    }

    /// Verifies credentials and stamps the login time.
    ///
    /// Returns whether the user has completed the questionnaire.
    pub fn authenticate(
        &mut self,
        username: &Username,
        password: &str,
        now: Timestamp,
    ) -> Result<bool, DomainError> {
        let profile = self.require_mut(username)?;
        if !profile.credential_digest.verify(password) {
            return Err(DomainError::new(
                ErrorCode::InvalidCredential,
                "Invalid username or password",
            ));
        }
        profile.record_login(now);
        Ok(profile.dass_completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> Username {
        Username::new(s).unwrap()
    }

    #[test]
    fn register_then_duplicate_is_rejected() {
        let mut dir = UserDirectory::new();
        let now = Timestamp::now();
        dir.register(name("river"), "pw", "r@x.io", now).unwrap();
        let err = dir.register(name("river"), "other", "r@x.io", now).unwrap_err();
        assert_eq!(err.code(), ErrorCode::DuplicateUser);
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn register_validates_password_and_email() {
        let mut dir = UserDirectory::new();
        let now = Timestamp::now();
        assert_eq!(
            dir.register(name("a"), "", "a@x.io", now).unwrap_err().code(),
            ErrorCode::ValidationFailed
        );
        assert_eq!(
            dir.register(name("a"), "pw", "nope", now).unwrap_err().code(),
            ErrorCode::ValidationFailed
        );
        assert!(dir.is_empty());
    }

    #[test]
    fn authenticate_outcomes() {
        let mut dir = UserDirectory::new();
        let now = Timestamp::now();
        dir.register(name("river"), "pw", "r@x.io", now).unwrap();

        assert_eq!(
            dir.authenticate(&name("ghost"), "pw", now).unwrap_err().code(),
            ErrorCode::NotFound
        );
        assert_eq!(
            dir.authenticate(&name("river"), "bad", now).unwrap_err().code(),
            ErrorCode::InvalidCredential
        );
        assert_eq!(dir.authenticate(&name("river"), "pw", now), Ok(false));
        assert_eq!(dir.get(&name("river")).unwrap().last_login_at, Some(now));
    }

    #[test]
    fn serializes_as_object_keyed_by_username() {
        let mut dir = UserDirectory::new();
        dir.register(name("river"), "pw", "r@x.io", Timestamp::now()).unwrap();
        let json = serde_json::to_value(&dir).unwrap();
        assert!(json.get("river").is_some());
        let back: UserDirectory = serde_json::from_value(json).unwrap();
        assert_eq!(back, dir);
    }
}
