//! Session domain entity
//!
//! This module defines the `Session` entity (whether a user is currently
//! authenticated) and the `FlowState` machine that the authentication flow
//! moves through while a submission is outstanding.
//!
//! The identity provider is the source of truth for the session; the
//! application only ever reads it or requests transitions. The invariant
//! "authenticated iff a user id is present" is enforced by construction:
//! the profile (and therefore the user id) only exists inside the
//! `Authenticated` variant.

use serde::{Deserialize, Serialize};

use super::newtypes::{Email, UserId};

/// Profile of an authenticated user
///
/// A snapshot of what the identity provider reported at sign-in time.
/// The display name and email may be absent (a freshly created account
/// has no display name until the follow-up profile update succeeds).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Opaque provider-issued user identifier
    user_id: UserId,
    /// Display name, if the provider has one on record
    display_name: Option<String>,
    /// Email address, if the provider reported one
    email: Option<Email>,
}

impl UserProfile {
    /// Creates a new UserProfile
    pub fn new(user_id: UserId, display_name: Option<String>, email: Option<Email>) -> Self {
        Self {
            user_id,
            display_name,
            email,
        }
    }

    /// Returns the provider-issued user identifier
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the display name, if any
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Returns the email address, if any
    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }
}

/// Whether a user is currently authenticated
///
/// Created unauthenticated at process start, set to authenticated by a
/// successful login or registration, and cleared by explicit logout.
/// Transitions are driven only by identity-provider outcomes, never by
/// direct assignment from the UI layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Session {
    /// No user is signed in
    #[default]
    Unauthenticated,
    /// A user is signed in with the given profile
    Authenticated(UserProfile),
}

impl Session {
    /// Returns true if a user is signed in
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    /// Returns the authenticated user's profile, if any
    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            Session::Unauthenticated => None,
            Session::Authenticated(profile) => Some(profile),
        }
    }

    /// Returns the authenticated user's id, if any
    ///
    /// Present exactly when [`Session::is_authenticated`] is true.
    pub fn user_id(&self) -> Option<&UserId> {
        self.profile().map(UserProfile::user_id)
    }

    /// Returns the authenticated user's display name, if any
    pub fn display_name(&self) -> Option<&str> {
        self.profile().and_then(UserProfile::display_name)
    }
}

impl std::fmt::Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Session::Unauthenticated => write!(f, "unauthenticated"),
            Session::Authenticated(profile) => {
                write!(f, "authenticated: {}", profile.user_id())
            }
        }
    }
}

/// State of the authentication flow between submissions
///
/// ```text
/// Unauthenticated --submit(valid creds)--> Pending --success--> Authenticated
/// Pending --failure--> Unauthenticated (error shown)
/// Authenticated --logout--> Unauthenticated
/// ```
///
/// `Pending` is the explicit single-in-flight guard: while a request is
/// outstanding, a second submit is rejected without a provider call. No
/// retries happen automatically; the user must resubmit after a failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    /// No user signed in, form is interactive
    #[default]
    Unauthenticated,
    /// A login or registration request is in flight
    Pending,
    /// A user is signed in
    Authenticated,
}

impl FlowState {
    /// Returns true if a request is currently in flight
    pub fn is_pending(&self) -> bool {
        matches!(self, FlowState::Pending)
    }

    /// Returns true if the flow has reached the authenticated area
    pub fn is_authenticated(&self) -> bool {
        matches!(self, FlowState::Authenticated)
    }
}

impl std::fmt::Display for FlowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FlowState::Unauthenticated => "unauthenticated",
            FlowState::Pending => "pending",
            FlowState::Authenticated => "authenticated",
        };
        write!(f, "{}", s)
    }
}
