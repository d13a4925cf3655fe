//! Identity provider port (driven/secondary port)
//!
//! This module defines the interface for the external identity provider
//! that performs credential verification and account management. The
//! primary implementation targets Firebase Authentication via its REST
//! API, but the trait is provider-agnostic.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because errors at port boundaries are
//!   adapter-specific and don't need domain-level classification. The use
//!   case layer maps them to an opaque provider error whose message is
//!   shown to the user verbatim.
//! - Uses `#[async_trait]` for the async methods. `sign_out` and
//!   `current_user` are synchronous by contract: sign-out is a local
//!   operation and the current-user accessor is a read of provider state.
//! - `AuthUser` is a port-level DTO, not a domain entity; use cases are
//!   responsible for mapping it to a `UserProfile`.

use serde::{Deserialize, Serialize};

/// The provider's view of an authenticated user
///
/// Raw data as reported by the identity provider. Fields other than the
/// identifier may be absent; in particular a freshly created account has
/// no display name until a profile update succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Provider-specific user identifier
    pub uid: String,
    /// Email address on record, if any
    pub email: Option<String>,
    /// Display name on record, if any
    pub display_name: Option<String>,
}

/// Port trait for identity provider operations
///
/// This is the only interface through which the application talks to the
/// authentication backend. Implementations handle the provider-specific
/// API calls, session-token bookkeeping, and error mapping.
///
/// ## Implementation Notes
///
/// - A successful `sign_in` or `create_account` must make the user visible
///   through `current_user` until `sign_out` is called. The provider owns
///   the session; callers never persist their own copy.
/// - `update_profile` operates on the currently signed-in user and should
///   fail if there is none.
/// - Implementations must not retry failed requests; the flow surfaces the
///   failure and waits for the user to resubmit.
#[async_trait::async_trait]
pub trait IIdentityProvider: Send + Sync {
    /// Verifies an email/password pair and establishes a session
    ///
    /// # Arguments
    /// * `email` - The account email
    /// * `password` - The account password
    ///
    /// # Returns
    /// The signed-in user on success
    async fn sign_in(&self, email: &str, password: &str) -> anyhow::Result<AuthUser>;

    /// Creates a new account and establishes a session for it
    ///
    /// # Arguments
    /// * `email` - Email for the new account
    /// * `password` - Password for the new account
    ///
    /// # Returns
    /// The newly created user on success
    async fn create_account(&self, email: &str, password: &str) -> anyhow::Result<AuthUser>;

    /// Sets the display name on the currently signed-in account
    ///
    /// # Arguments
    /// * `display_name` - The display name to record
    ///
    /// # Returns
    /// The updated user on success
    async fn update_profile(&self, display_name: &str) -> anyhow::Result<AuthUser>;

    /// Ends the current session
    ///
    /// Synchronous and infallible: clears local session state without a
    /// network call. Safe to call when no user is signed in.
    fn sign_out(&self);

    /// Returns the currently signed-in user, if any
    ///
    /// Synchronous read of provider state; calling it repeatedly without
    /// an intervening operation yields the same result.
    fn current_user(&self) -> Option<AuthUser>;
}
