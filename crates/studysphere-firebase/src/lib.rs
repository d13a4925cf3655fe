//! StudySphere Firebase - Firebase Authentication adapter
//!
//! Provides the identity-provider implementation backed by the Firebase
//! Authentication REST API (Identity Toolkit):
//! - Email/password sign-in and sign-up
//! - Display-name profile updates
//! - In-memory session bookkeeping (sign-out, current user)
//!
//! ## Modules
//!
//! - [`client`] - Typed HTTP client for the Identity Toolkit endpoints
//! - [`provider`] - `IIdentityProvider` port implementation

pub mod client;
pub mod provider;

use thiserror::Error;

/// Error reported by the Firebase Authentication API
///
/// The display form is the provider's raw message string (for example
/// `EMAIL_NOT_FOUND` or `INVALID_PASSWORD`), which the authentication
/// flow surfaces to the user verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FirebaseApiError {
    /// HTTP-style status code from the error envelope
    pub code: u32,
    /// Provider error message, passed through untouched
    pub message: String,
}
