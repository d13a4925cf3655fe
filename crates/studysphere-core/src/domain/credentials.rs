//! Transient credential types
//!
//! `Credentials` and `RegistrationRequest` exist only for the duration of a
//! single submit operation and are never persisted. Validation is performed
//! synchronously before dispatch, in a fixed order, short-circuiting on the
//! first failure so exactly one field-local error is reported at a time.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// Minimum password length accepted for registration
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Form field a validation error is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialField {
    /// The display-name field (registration only)
    DisplayName,
    /// The email field
    Email,
    /// The password field
    Password,
}

impl fmt::Display for CredentialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CredentialField::DisplayName => "display name",
            CredentialField::Email => "email",
            CredentialField::Password => "password",
        };
        write!(f, "{}", s)
    }
}

/// Email/password pair for a login attempt
///
/// Inputs are trimmed at construction, mirroring what the form layer does
/// before submission.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Creates login credentials, trimming surrounding whitespace
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into().trim().to_string(),
        }
    }

    /// Returns the email as entered (trimmed)
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the password as entered (trimmed)
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Validates the login form
    ///
    /// Checks in order, stopping at the first failure:
    /// 1. email non-empty
    /// 2. password non-empty
    ///
    /// # Errors
    /// Returns `DomainError::MissingField` naming the offending field
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.email.is_empty() {
            return Err(DomainError::MissingField {
                field: CredentialField::Email,
            });
        }
        if self.password.is_empty() {
            return Err(DomainError::MissingField {
                field: CredentialField::Password,
            });
        }
        Ok(())
    }
}

// Passwords never appear in logs or debug output.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Display name, email, and password for a registration attempt
#[derive(Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    display_name: String,
    email: String,
    password: String,
}

impl RegistrationRequest {
    /// Creates a registration request, trimming surrounding whitespace
    pub fn new(
        display_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into().trim().to_string(),
            email: email.into().trim().to_string(),
            password: password.into().trim().to_string(),
        }
    }

    /// Returns the requested display name (trimmed)
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the email as entered (trimmed)
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the password as entered (trimmed)
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Validates the registration form
    ///
    /// Checks in order, stopping at the first failure:
    /// 1. display name non-empty
    /// 2. email non-empty
    /// 3. password non-empty
    /// 4. password length >= [`MIN_PASSWORD_LENGTH`]
    ///
    /// # Errors
    /// Returns `DomainError::MissingField` or `DomainError::PasswordTooShort`
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.display_name.is_empty() {
            return Err(DomainError::MissingField {
                field: CredentialField::DisplayName,
            });
        }
        if self.email.is_empty() {
            return Err(DomainError::MissingField {
                field: CredentialField::Email,
            });
        }
        if self.password.is_empty() {
            return Err(DomainError::MissingField {
                field: CredentialField::Password,
            });
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("display_name", &self.display_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
