//! One-way credential digest.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::domain::foundation::ValidationError;

/// Lowercase hex SHA-256 digest of a password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialDigest(String);

impl CredentialDigest {
    pub fn from_password(password: &str) -> Result<Self, ValidationError> {
        if password.is_empty() {
            return Err(ValidationError::empty_field("password"));
        }
        Ok(Self(Self::hex_digest(password)))
    }

    /// Constant-time comparison against a candidate password.
    pub fn verify(&self, password: &str) -> bool {
        let candidate = Self::hex_digest(password);
        candidate.as_bytes().ct_eq(self.0.as_bytes()).into()
    }

    fn hex_digest(password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(password.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

impl std::fmt::Debug for CredentialDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CredentialDigest([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_lowercase_hex_sha256() {
        let digest = CredentialDigest::from_password("password").unwrap();
        let json = serde_json::to_string(&digest).unwrap();
        assert_eq!(
            json,
            "\"5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8\""
        );
    }

    #[test]
    fn verify_matches_only_same_password() {
        let digest = CredentialDigest::from_password("s3cret").unwrap();
        assert!(digest.verify("s3cret"));
        assert!(!digest.verify("S3cret"));
        assert!(!digest.verify(""));
    }

    #[test]
    fn empty_password_is_rejected() {
        assert!(CredentialDigest::from_password("").is_err());
    }

    #[test]
    fn debug_does_not_leak_digest() {
        let digest = CredentialDigest::from_password("s3cret").unwrap();
        assert!(!format!("{:?}", digest).contains(&digest.0));
    }
}
