//! Integration tests for account creation and profile updates
//!
//! Covers the two-step registration sequence at the provider level:
//! sign-up establishes the session, the display-name update reuses its
//! id token, and updating without a session is rejected locally.

use studysphere_core::ports::IIdentityProvider;

use crate::common;

#[tokio::test]
async fn test_create_account_has_no_display_name() {
    let (server, provider) = common::setup_provider_mock().await;
    common::mount_sign_up_ok(&server, "ann@example.com").await;

    let user = provider
        .create_account("ann@example.com", "secret1")
        .await
        .expect("create_account failed");

    assert_eq!(user.uid, "user-test-001");
    assert_eq!(user.email.as_deref(), Some("ann@example.com"));
    assert!(user.display_name.is_none());
    assert!(provider.current_user().is_some());
}

#[tokio::test]
async fn test_update_profile_uses_sign_up_token() {
    let (server, provider) = common::setup_provider_mock().await;
    common::mount_sign_up_ok(&server, "ann@example.com").await;
    common::mount_update_ok(&server, "ann@example.com", "Ann").await;

    provider
        .create_account("ann@example.com", "secret1")
        .await
        .expect("create_account failed");

    // The update mock matches on the display name in the body; the id
    // token requirement is asserted separately below.
    let updated = provider
        .update_profile("Ann")
        .await
        .expect("update_profile failed");

    assert_eq!(updated.display_name.as_deref(), Some("Ann"));

    // The stored session reflects the update.
    let current = provider.current_user().expect("session lost");
    assert_eq!(current.display_name.as_deref(), Some("Ann"));

    let requests = server
        .received_requests()
        .await
        .expect("request recording enabled");
    let update = requests
        .iter()
        .find(|r| r.url.path() == "/accounts:update")
        .expect("no update request recorded");
    let body: serde_json::Value =
        serde_json::from_slice(&update.body).expect("update body not json");
    assert_eq!(body["idToken"], "id-token-signup");
}

#[tokio::test]
async fn test_update_profile_without_session_is_local_error() {
    let (server, provider) = common::setup_provider_mock().await;

    let err = provider
        .update_profile("Ann")
        .await
        .expect_err("update_profile should fail");
    assert!(err.to_string().contains("No user is signed in"));

    // Nothing was sent over the wire.
    let requests = server
        .received_requests()
        .await
        .expect("request recording enabled");
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_create_account_error_leaves_no_session() {
    let (server, provider) = common::setup_provider_mock().await;
    common::mount_error(&server, "signUp", 400, "EMAIL_EXISTS").await;

    let err = provider
        .create_account("ann@example.com", "secret1")
        .await
        .expect_err("create_account should fail");

    assert_eq!(err.to_string(), "EMAIL_EXISTS");
    assert!(provider.current_user().is_none());
}

#[tokio::test]
async fn test_update_profile_failure_keeps_session() {
    let (server, provider) = common::setup_provider_mock().await;
    common::mount_sign_up_ok(&server, "ann@example.com").await;
    common::mount_error(&server, "update", 400, "INVALID_ID_TOKEN").await;

    provider
        .create_account("ann@example.com", "secret1")
        .await
        .expect("create_account failed");

    let err = provider
        .update_profile("Ann")
        .await
        .expect_err("update_profile should fail");
    assert!(err.to_string().contains("Failed to update profile"));

    // The account session survives a failed profile update.
    let current = provider.current_user().expect("session lost");
    assert_eq!(current.uid, "user-test-001");
    assert!(current.display_name.is_none());
}
