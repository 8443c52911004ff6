//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    IncompleteSubmission,

    // Scoring errors
    InsufficientData,

    // Account errors
    DuplicateUser,
    NotFound,
    InvalidCredential,

    // Storage errors
    StorageCorrupted,
    StorageError,

    // Collaborator errors
    ClassifierUnavailable,
    ResponseGeneratorUnavailable,
    RenderFailed,

    InternalError,
}

impl ErrorCode {
    /// Whether the condition should be shown to the end user as-is.
    pub fn is_user_visible(&self) -> bool {
        matches!(
            self,
            ErrorCode::ValidationFailed
                | ErrorCode::IncompleteSubmission
                | ErrorCode::DuplicateUser
                | ErrorCode::NotFound
                | ErrorCode::InvalidCredential
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::IncompleteSubmission => "INCOMPLETE_SUBMISSION",
            ErrorCode::InsufficientData => "INSUFFICIENT_DATA",
            ErrorCode::DuplicateUser => "DUPLICATE_USER",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::InvalidCredential => "INVALID_CREDENTIAL",
            ErrorCode::StorageCorrupted => "STORAGE_CORRUPTED",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::ClassifierUnavailable => "CLASSIFIER_UNAVAILABLE",
            ErrorCode::ResponseGeneratorUnavailable => "RESPONSE_GENERATOR_UNAVAILABLE",
            ErrorCode::RenderFailed => "RENDER_FAILED",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_detail("field", field.into())
    }

    /// Creates a not found error for a user.
    pub fn user_not_found(username: impl Into<String>) -> Self {
        let username = username.into();
        Self::new(ErrorCode::NotFound, format!("User '{}' not found", username))
            .with_detail("username", username)
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        DomainError::validation(field, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("username");
        assert_eq!(format!("{}", err), "Field 'username' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("answer", 0, 3, 7);
        assert_eq!(
            format!("{}", err),
            "Field 'answer' must be between 0 and 3, got 7"
        );
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::DuplicateUser, "Username already exists");
        assert_eq!(format!("{}", err), "[DUPLICATE_USER] Username already exists");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::new(ErrorCode::ValidationFailed, "Validation failed")
            .with_detail("field", "email")
            .with_detail("reason", "missing @");

        assert_eq!(err.details.get("field"), Some(&"email".to_string()));
        assert_eq!(err.details.get("reason"), Some(&"missing @".to_string()));
    }

    #[test]
    fn validation_error_converts_with_field_detail() {
        let err: DomainError = ValidationError::empty_field("text").into();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert_eq!(err.details.get("field"), Some(&"text".to_string()));
    }

    #[test]
    fn user_not_found_carries_username() {
        let err = DomainError::user_not_found("river");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert!(err.message().contains("river"));
    }

    #[test]
    fn user_visible_codes() {
        assert!(ErrorCode::InvalidCredential.is_user_visible());
        assert!(ErrorCode::IncompleteSubmission.is_user_visible());
        assert!(!ErrorCode::StorageError.is_user_visible());
        assert!(!ErrorCode::ClassifierUnavailable.is_user_visible());
    }
}
