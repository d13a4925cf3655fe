//! Domain error types
//!
//! This module defines error types specific to domain operations:
//! local validation failures (field-specific, shown inline) and the
//! flow-level errors produced while a submission is being processed.

use thiserror::Error;

use super::credentials::CredentialField;

/// Errors that can occur in domain operations
///
/// Every variant of this enum is a *local* failure: it is detected before
/// any identity-provider call is made and names the offending field so the
/// caller can surface it inline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required form field was left empty
    #[error("{field} is required")]
    MissingField {
        /// The field that was empty
        field: CredentialField,
    },

    /// Registration password is shorter than the provider minimum
    #[error("Password should be at least {min} characters")]
    PasswordTooShort {
        /// Minimum accepted password length
        min: usize,
    },

    /// Invalid email address format
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    /// Invalid (empty) provider user identifier
    #[error("Invalid user id: {0}")]
    InvalidUserId(String),
}

impl DomainError {
    /// Returns the form field this error should be attached to, if any
    pub fn field(&self) -> Option<CredentialField> {
        match self {
            DomainError::MissingField { field } => Some(*field),
            DomainError::PasswordTooShort { .. } => Some(CredentialField::Password),
            DomainError::InvalidEmail(_) => Some(CredentialField::Email),
            DomainError::InvalidUserId(_) => None,
        }
    }
}

/// Errors produced by the authentication flow as a whole
///
/// Distinguishes local validation failures (inline, resubmittable without
/// a provider round-trip) from remote provider failures (opaque message,
/// surfaced as a transient notification). No variant is fatal: every
/// failure returns the flow to an interactive, resubmittable state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Local validation failed; no provider call was made
    #[error(transparent)]
    Validation(#[from] DomainError),

    /// The identity provider rejected the request.
    ///
    /// The message is the provider's raw error string, passed through
    /// verbatim for the user to see.
    #[error("{0}")]
    Provider(String),

    /// A login or registration request is already in flight
    #[error("A sign-in or registration request is already in progress")]
    SubmissionInProgress,
}

impl AuthError {
    /// Returns true if this error was detected locally, before dispatch
    pub fn is_validation(&self) -> bool {
        matches!(self, AuthError::Validation(_))
    }

    /// Returns the provider's raw message, if this is a provider failure
    pub fn provider_message(&self) -> Option<&str> {
        match self {
            AuthError::Provider(msg) => Some(msg),
            _ => None,
        }
    }
}
