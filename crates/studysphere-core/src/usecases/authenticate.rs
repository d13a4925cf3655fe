//! Authentication use case
//!
//! Orchestrates the session-gating flow: the session gate (which area of
//! the application to show), credential submission with local validation,
//! and outcome handling for the identity provider's asynchronous results.
//! Delegates credential verification to the identity-provider port and
//! user feedback to the notification port.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};

use crate::{
    domain::{
        AuthError, Credentials, DomainError, Email, FlowState, RegistrationRequest, Session,
        UserId, UserProfile,
    },
    ports::{AuthUser, IIdentityProvider, INotificationService, Notification},
};

/// Use case for the authentication flow
///
/// Coordinates the two-state session gate, the credential submitter, and
/// the outcome handler between the identity-provider and notification
/// ports. At most one login-or-registration request is in flight at a
/// time; the guard is enforced here, not left to UI widget state.
pub struct AuthenticateUseCase {
    identity_provider: Arc<dyn IIdentityProvider + Send + Sync>,
    notifier: Arc<dyn INotificationService + Send + Sync>,
    flow_state: Mutex<FlowState>,
}

impl AuthenticateUseCase {
    /// Creates a new AuthenticateUseCase with the required dependencies
    ///
    /// # Arguments
    ///
    /// * `identity_provider` - External identity provider for credential
    ///   verification and account management
    /// * `notifier` - Transient user feedback (notifications, busy indicator)
    pub fn new(
        identity_provider: Arc<dyn IIdentityProvider + Send + Sync>,
        notifier: Arc<dyn INotificationService + Send + Sync>,
    ) -> Self {
        Self {
            identity_provider,
            notifier,
            flow_state: Mutex::new(FlowState::Unauthenticated),
        }
    }

    /// Session gate: evaluates the current session
    ///
    /// Maps the provider's synchronous current-user accessor to a
    /// [`Session`]. The provider is the source of truth, so this is an
    /// idempotent read: re-evaluating without an intervening provider
    /// operation yields the same result.
    pub fn current_session(&self) -> Session {
        match self.identity_provider.current_user() {
            Some(user) => match Self::profile_from(&user) {
                Ok(profile) => Session::Authenticated(profile),
                Err(err) => {
                    warn!(error = %err, "Provider reported a malformed user, treating as unauthenticated");
                    Session::Unauthenticated
                }
            },
            None => Session::Unauthenticated,
        }
    }

    /// Returns the flow's current state (for gating the submit controls)
    pub fn flow_state(&self) -> FlowState {
        *self.state()
    }

    /// Submits a login attempt
    ///
    /// This method:
    /// 1. Validates the credentials locally (short-circuiting; a failure
    ///    aborts with no provider call)
    /// 2. Acquires the single-in-flight slot and raises the busy indicator
    /// 3. Dispatches sign-in to the identity provider
    /// 4. Handles the outcome: success transitions the gate to
    ///    Authenticated; failure returns to Unauthenticated and surfaces
    ///    the provider's message as a transient notification
    ///
    /// # Errors
    ///
    /// - [`AuthError::Validation`] if a field fails local validation
    /// - [`AuthError::SubmissionInProgress`] if a request is already in flight
    /// - [`AuthError::Provider`] if the provider rejects the credentials
    pub async fn submit_login(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        // Step 1: local validation, no provider call on failure
        credentials.validate()?;

        // Step 2: single-in-flight guard, then busy indicator
        self.begin_submission()?;
        self.set_busy(true).await;

        debug!(email = %credentials.email(), "Dispatching sign-in request");

        // Step 3: dispatch to the identity provider
        let result = self
            .identity_provider
            .sign_in(credentials.email(), credentials.password())
            .await;

        // Step 4: outcome handling
        match result.and_then(|user| Self::profile_from(&user).map_err(Into::into)) {
            Ok(profile) => {
                self.finish_submission(FlowState::Authenticated);
                self.set_busy(false).await;
                info!(user_id = %profile.user_id(), "Login succeeded");
                Ok(Session::Authenticated(profile))
            }
            Err(err) => Err(self.fail_submission("Login failed", err.to_string()).await),
        }
    }

    /// Submits a registration attempt
    ///
    /// This method:
    /// 1. Validates the form locally (short-circuiting; a failure aborts
    ///    with no provider call)
    /// 2. Acquires the single-in-flight slot and raises the busy indicator
    /// 3. Requests account creation from the identity provider
    /// 4. On creation success, issues the display-name update, strictly
    ///    sequenced after creation; the busy indicator stays up until this
    ///    follow-up completes
    /// 5. Handles the outcome: creation failure skips the display-name
    ///    step entirely and surfaces the error; a display-name failure
    ///    still counts as a successful registration (the account already
    ///    exists, forward progress wins) but records exactly one secondary
    ///    error notification
    ///
    /// # Errors
    ///
    /// - [`AuthError::Validation`] if a field fails local validation
    /// - [`AuthError::SubmissionInProgress`] if a request is already in flight
    /// - [`AuthError::Provider`] if account creation fails
    pub async fn submit_registration(
        &self,
        request: &RegistrationRequest,
    ) -> Result<Session, AuthError> {
        // Step 1: local validation, no provider call on failure
        request.validate()?;

        // Step 2: single-in-flight guard, then busy indicator
        self.begin_submission()?;
        self.set_busy(true).await;

        debug!(email = %request.email(), "Dispatching account creation");

        // Step 3: account creation
        let created = match self
            .identity_provider
            .create_account(request.email(), request.password())
            .await
        {
            Ok(user) => user,
            Err(err) => {
                // Creation failed: the display-name step is skipped entirely.
                return Err(
                    self.fail_submission("Registration failed", err.to_string())
                        .await,
                );
            }
        };

        // Step 4: display-name update, strictly after creation success
        let (user, secondary_error) = match self
            .identity_provider
            .update_profile(request.display_name())
            .await
        {
            Ok(updated) => (updated, None),
            Err(err) => {
                warn!(error = %err, "Display-name update failed after account creation");
                (created, Some(err.to_string()))
            }
        };

        let profile = match Self::profile_from(&user) {
            Ok(profile) => profile,
            Err(err) => {
                return Err(
                    self.fail_submission("Registration failed", err.to_string())
                        .await,
                );
            }
        };

        // Step 5: the registration is successful either way from here;
        // navigation happens, and a display-name failure only adds a
        // secondary notification.
        self.finish_submission(FlowState::Authenticated);
        self.set_busy(false).await;

        match secondary_error {
            None => {
                info!(user_id = %profile.user_id(), "Registration succeeded");
                self.notify(Notification::auth(
                    "Registration successful",
                    format!("Welcome, {}", request.display_name()),
                ))
                .await;
            }
            Some(message) => {
                self.notify(Notification::error("Failed to update profile", message))
                    .await;
            }
        }

        Ok(Session::Authenticated(profile))
    }

    /// Logs the current user out
    ///
    /// Synchronous: clears the provider session and resets the flow state
    /// unconditionally, regardless of any prior async state. The caller
    /// navigates back to the login area afterwards. A submission still in
    /// flight is not cancelled; when it completes it reports its own
    /// outcome, which may re-establish the session.
    pub fn logout(&self) -> Session {
        self.identity_provider.sign_out();
        *self.state() = FlowState::Unauthenticated;
        info!("Signed out");
        Session::Unauthenticated
    }

    // --- Internals ---

    /// Locks the flow state, recovering from a poisoned lock
    fn state(&self) -> MutexGuard<'_, FlowState> {
        self.flow_state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Claims the single-in-flight submission slot
    fn begin_submission(&self) -> Result<(), AuthError> {
        let mut state = self.state();
        if state.is_pending() {
            return Err(AuthError::SubmissionInProgress);
        }
        *state = FlowState::Pending;
        Ok(())
    }

    /// Releases the submission slot, recording the outcome state
    fn finish_submission(&self, next: FlowState) {
        *self.state() = next;
    }

    /// Shared failure path: re-enable the form, hide the busy indicator,
    /// surface the message, and return the error for the caller
    async fn fail_submission(&self, title: &str, message: String) -> AuthError {
        self.finish_submission(FlowState::Unauthenticated);
        self.set_busy(false).await;
        self.notify(Notification::error(title, &message)).await;
        AuthError::Provider(message)
    }

    /// Maps the provider's user DTO to a domain profile
    ///
    /// A missing or empty user id is a hard error (it would violate the
    /// session invariant); an unparseable email is tolerated and dropped,
    /// since the provider remains the source of truth for it.
    fn profile_from(user: &AuthUser) -> Result<UserProfile, DomainError> {
        let user_id = UserId::new(user.uid.clone())?;
        let email = user.email.as_deref().and_then(|raw| match Email::new(raw) {
            Ok(email) => Some(email),
            Err(err) => {
                warn!(error = %err, "Ignoring malformed email from provider");
                None
            }
        });
        Ok(UserProfile::new(
            user_id,
            user.display_name.clone(),
            email,
        ))
    }

    /// Updates the busy indicator; delivery failures are logged, never fatal
    async fn set_busy(&self, busy: bool) {
        if let Err(err) = self.notifier.set_busy(busy).await {
            warn!(error = %err, "Failed to update busy indicator");
        }
    }

    /// Delivers a notification; delivery failures are logged, never fatal
    async fn notify(&self, notification: Notification) {
        if let Err(err) = self.notifier.notify(&notification).await {
            warn!(error = %err, "Failed to deliver notification");
        }
    }
}
