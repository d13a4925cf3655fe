//! Firebase Authentication REST client
//!
//! Provides a typed HTTP client for the Identity Toolkit API. Handles the
//! API-key query parameter, JSON serialization, and the Firebase error
//! envelope (`{"error": {"code", "message"}}`).
//!
//! ## Usage
//!
//! ```rust,no_run
//! use studysphere_firebase::client::FirebaseClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = FirebaseClient::new("web-api-key");
//! let signed_in = client.sign_in_with_password("a@b.com", "secret1").await?;
//! println!("Hello, {}", signed_in.local_id);
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::FirebaseApiError;

/// Base URL for the Identity Toolkit API v1
const IDENTITY_TOOLKIT_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";

// ============================================================================
// Request types
// ============================================================================

/// Body for `accounts:signUp` and `accounts:signInWithPassword`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

/// Body for `accounts:update` (profile update)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateRequest<'a> {
    id_token: &'a str,
    display_name: &'a str,
    return_secure_token: bool,
}

// ============================================================================
// Response types
// ============================================================================

/// Response from `accounts:signUp` and `accounts:signInWithPassword`
///
/// Sign-up responses carry no `displayName`; sign-in responses include it
/// when the account has one on record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    /// Provider-assigned user identifier
    pub local_id: String,
    /// Email the account is registered under
    pub email: String,
    /// Display name on record, if any
    pub display_name: Option<String>,
    /// Session token for authenticated follow-up calls
    pub id_token: String,
    /// Token lifetime in seconds, as a decimal string (e.g., "3600")
    pub expires_in: String,
}

/// Response from `accounts:update`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    /// Provider-assigned user identifier
    pub local_id: String,
    /// Email the account is registered under, if reported
    pub email: Option<String>,
    /// Display name after the update
    pub display_name: Option<String>,
}

/// Firebase error envelope: `{"error": {"code": 400, "message": "..."}}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: u32,
    message: String,
}

// ============================================================================
// FirebaseClient
// ============================================================================

/// HTTP client for Firebase Authentication (Identity Toolkit) calls
///
/// Wraps `reqwest::Client` with the API-key query parameter and endpoint
/// construction. The client is stateless; session bookkeeping lives in
/// the provider adapter.
pub struct FirebaseClient {
    /// The underlying HTTP client
    client: Client,
    /// Base URL for API requests
    base_url: String,
    /// Firebase Web API key, sent as the `key` query parameter
    api_key: String,
}

impl FirebaseClient {
    /// Creates a new FirebaseClient for the production endpoint
    ///
    /// # Arguments
    /// * `api_key` - The Firebase Web API key for the project
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: IDENTITY_TOOLKIT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Creates a new FirebaseClient with a custom base URL (useful for testing)
    ///
    /// # Arguments
    /// * `api_key` - The Firebase Web API key
    /// * `base_url` - Custom base URL for API requests
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Verifies an email/password pair
    ///
    /// Makes `POST /accounts:signInWithPassword`.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SignInResponse> {
        debug!(email = %email, "POST accounts:signInWithPassword");
        self.execute(
            "signInWithPassword",
            &PasswordRequest {
                email,
                password,
                return_secure_token: true,
            },
        )
        .await
    }

    /// Creates a new email/password account
    ///
    /// Makes `POST /accounts:signUp`. The response carries no display
    /// name; setting one requires a follow-up [`FirebaseClient::update_account`].
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignInResponse> {
        debug!(email = %email, "POST accounts:signUp");
        self.execute(
            "signUp",
            &PasswordRequest {
                email,
                password,
                return_secure_token: true,
            },
        )
        .await
    }

    /// Sets the display name on the account identified by `id_token`
    ///
    /// Makes `POST /accounts:update`.
    pub async fn update_account(
        &self,
        id_token: &str,
        display_name: &str,
    ) -> Result<UpdateResponse> {
        debug!(display_name = %display_name, "POST accounts:update");
        self.execute(
            "update",
            &UpdateRequest {
                id_token,
                display_name,
                return_secure_token: false,
            },
        )
        .await
    }

    /// Executes an Identity Toolkit action and decodes the response
    ///
    /// On a non-success status the Firebase error envelope is parsed and
    /// returned as a [`FirebaseApiError`] whose display form is the
    /// provider's raw message, so the flow can surface it verbatim.
    async fn execute<T: DeserializeOwned>(
        &self,
        action: &str,
        body: &impl Serialize,
    ) -> Result<T> {
        let url = format!("{}/accounts:{}", self.base_url, action);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to reach identity provider (accounts:{action})"))?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .with_context(|| format!("Failed to read error response (accounts:{action})"))?;

            let api_error = match serde_json::from_str::<ErrorEnvelope>(&text) {
                Ok(envelope) => FirebaseApiError {
                    code: envelope.error.code,
                    message: envelope.error.message,
                },
                // Not the documented envelope; fall back to the status line.
                Err(_) => FirebaseApiError {
                    code: status.as_u16().into(),
                    message: status.to_string(),
                },
            };

            debug!(code = api_error.code, message = %api_error.message, "Identity provider rejected accounts:{}", action);
            return Err(api_error.into());
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse response (accounts:{action})"))
    }
}
