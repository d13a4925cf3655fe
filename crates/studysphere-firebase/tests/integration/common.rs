//! Shared test helpers for Identity Toolkit integration tests
//!
//! Provides wiremock-based mock server setup for the Firebase
//! Authentication endpoints, plus a recording notification service for
//! flow-level tests.

use std::sync::Mutex;

use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use studysphere_core::ports::{INotificationService, Notification};
use studysphere_firebase::client::FirebaseClient;
use studysphere_firebase::provider::FirebaseIdentityProvider;

pub const TEST_API_KEY: &str = "test-api-key";

/// Starts a mock Identity Toolkit server and returns a client pointed at it.
pub async fn setup_firebase_mock() -> (MockServer, FirebaseClient) {
    let server = MockServer::start().await;
    let client = FirebaseClient::with_base_url(TEST_API_KEY, server.uri());
    (server, client)
}

/// Like [`setup_firebase_mock`], but wraps the client in the provider adapter.
pub async fn setup_provider_mock() -> (MockServer, FirebaseIdentityProvider) {
    let (server, client) = setup_firebase_mock().await;
    (server, FirebaseIdentityProvider::new(client))
}

/// Mounts a successful `accounts:signInWithPassword` for the given account.
pub async fn mount_sign_in_ok(server: &MockServer, email: &str, display_name: Option<&str>) {
    let mut body = serde_json::json!({
        "kind": "identitytoolkit#VerifyPasswordResponse",
        "localId": "user-test-001",
        "email": email,
        "idToken": "id-token-signin",
        "registered": true,
        "refreshToken": "refresh-token",
        "expiresIn": "3600"
    });
    if let Some(name) = display_name {
        body["displayName"] = serde_json::json!(name);
    }

    Mock::given(method("POST"))
        .and(path("/accounts:signInWithPassword"))
        .and(query_param("key", TEST_API_KEY))
        .and(body_partial_json(serde_json::json!({
            "email": email,
            "returnSecureToken": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mounts a successful `accounts:signUp` (no display name in the response).
pub async fn mount_sign_up_ok(server: &MockServer, email: &str) {
    Mock::given(method("POST"))
        .and(path("/accounts:signUp"))
        .and(query_param("key", TEST_API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "kind": "identitytoolkit#SignupNewUserResponse",
            "localId": "user-test-001",
            "email": email,
            "idToken": "id-token-signup",
            "refreshToken": "refresh-token",
            "expiresIn": "3600"
        })))
        .mount(server)
        .await;
}

/// Mounts a successful `accounts:update` that echoes the display name.
pub async fn mount_update_ok(server: &MockServer, email: &str, display_name: &str) {
    Mock::given(method("POST"))
        .and(path("/accounts:update"))
        .and(query_param("key", TEST_API_KEY))
        .and(body_partial_json(serde_json::json!({
            "displayName": display_name
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "kind": "identitytoolkit#SetAccountInfoResponse",
            "localId": "user-test-001",
            "email": email,
            "displayName": display_name
        })))
        .mount(server)
        .await;
}

/// Mounts a Firebase error envelope for the given action.
pub async fn mount_error(server: &MockServer, action: &str, status: u16, message: &str) {
    Mock::given(method("POST"))
        .and(path(format!("/accounts:{action}")))
        .and(query_param("key", TEST_API_KEY))
        .respond_with(ResponseTemplate::new(status).set_body_json(serde_json::json!({
            "error": {
                "code": status,
                "message": message,
                "errors": [
                    { "message": message, "domain": "global", "reason": "invalid" }
                ]
            }
        })))
        .mount(server)
        .await;
}

/// Notification service that records deliveries for assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
    busy_events: Mutex<Vec<bool>>,
}

#[allow(dead_code)]
impl RecordingNotifier {
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn busy_events(&self) -> Vec<bool> {
        self.busy_events.lock().unwrap().clone()
    }

    pub fn error_count(&self) -> usize {
        self.notifications().iter().filter(|n| n.is_error()).count()
    }
}

#[async_trait::async_trait]
impl INotificationService for RecordingNotifier {
    async fn notify(&self, notification: &Notification) -> anyhow::Result<()> {
        self.notifications
            .lock()
            .unwrap()
            .push(notification.clone());
        Ok(())
    }

    async fn set_busy(&self, busy: bool) -> anyhow::Result<()> {
        self.busy_events.lock().unwrap().push(busy);
        Ok(())
    }
}
