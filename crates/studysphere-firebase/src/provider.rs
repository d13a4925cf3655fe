//! FirebaseIdentityProvider - IIdentityProvider implementation for Firebase
//!
//! Wraps the [`FirebaseClient`] and keeps the session (id token plus the
//! signed-in user) in memory to fulfil the [`IIdentityProvider`] port
//! contract. Nothing is persisted: dropping the provider drops the session.
//!
//! ## Design Notes
//!
//! - Uses `std::sync::Mutex` for the session cell because `sign_out` and
//!   `current_user` are synchronous by the port contract; the lock is
//!   never held across an await point.
//! - Sign-out is a local operation (clears the stored token); the Identity
//!   Toolkit has no server-side sign-out for password sessions.
//! - No retries: a failed request is returned as-is for the flow to
//!   surface, and the user resubmits manually.

use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use studysphere_core::ports::{AuthUser, IIdentityProvider};

use crate::client::{FirebaseClient, SignInResponse};

/// The in-memory session established by a sign-in or sign-up
#[derive(Debug, Clone)]
struct ProviderSession {
    /// Token for authenticated follow-up calls (profile update)
    id_token: String,
    /// When the id token expires
    expires_at: DateTime<Utc>,
    /// The signed-in user as last reported by the provider
    user: AuthUser,
}

/// Identity provider backed by the Firebase Authentication REST API
pub struct FirebaseIdentityProvider {
    client: FirebaseClient,
    session: Mutex<Option<ProviderSession>>,
}

impl FirebaseIdentityProvider {
    /// Creates a provider around an existing client
    pub fn new(client: FirebaseClient) -> Self {
        Self {
            client,
            session: Mutex::new(None),
        }
    }

    /// Returns when the current session's token expires, if signed in
    pub fn session_expires_at(&self) -> Option<DateTime<Utc>> {
        self.lock_session().as_ref().map(|s| s.expires_at)
    }

    fn lock_session(&self) -> MutexGuard<'_, Option<ProviderSession>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Builds and stores a session from a sign-in/sign-up response
    fn store_session(&self, response: &SignInResponse) -> AuthUser {
        let user = AuthUser {
            uid: response.local_id.clone(),
            email: Some(response.email.clone()),
            display_name: response.display_name.clone(),
        };

        let lifetime = response
            .expires_in
            .parse::<i64>()
            .map(Duration::seconds)
            .unwrap_or_else(|_| Duration::hours(1));
        let expires_at = Utc::now() + lifetime;

        debug!(uid = %user.uid, expires_at = %expires_at, "Session established");

        *self.lock_session() = Some(ProviderSession {
            id_token: response.id_token.clone(),
            expires_at,
            user: user.clone(),
        });

        user
    }
}

#[async_trait::async_trait]
impl IIdentityProvider for FirebaseIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser> {
        let response = self.client.sign_in_with_password(email, password).await?;
        Ok(self.store_session(&response))
    }

    async fn create_account(&self, email: &str, password: &str) -> Result<AuthUser> {
        let response = self.client.sign_up(email, password).await?;
        Ok(self.store_session(&response))
    }

    async fn update_profile(&self, display_name: &str) -> Result<AuthUser> {
        // Snapshot the token without holding the lock across the request.
        let id_token = match self.lock_session().as_ref() {
            Some(session) => session.id_token.clone(),
            None => bail!("No user is signed in"),
        };

        let response = self
            .client
            .update_account(&id_token, display_name)
            .await
            .context("Failed to update profile")?;

        let mut guard = self.lock_session();
        match guard.as_mut() {
            Some(session) => {
                session.user.display_name = response.display_name.clone();
                if let Some(email) = response.email {
                    session.user.email = Some(email);
                }
                Ok(session.user.clone())
            }
            // Signed out while the update was in flight; report the updated
            // user without resurrecting the session.
            None => Ok(AuthUser {
                uid: response.local_id,
                email: response.email,
                display_name: response.display_name,
            }),
        }
    }

    fn sign_out(&self) {
        let had_session = self.lock_session().take().is_some();
        debug!(had_session, "Signed out");
    }

    fn current_user(&self) -> Option<AuthUser> {
        self.lock_session().as_ref().map(|s| s.user.clone())
    }
}
