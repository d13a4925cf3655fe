//! Integration tests for email/password sign-in
//!
//! Verifies that the client parses the signInWithPassword response, that
//! the provider adapter establishes a session from it, and that error
//! envelopes surface the provider's message verbatim.

use studysphere_core::ports::IIdentityProvider;
use studysphere_firebase::provider::FirebaseIdentityProvider;
use studysphere_firebase::FirebaseApiError;

use crate::common;

#[tokio::test]
async fn test_client_sign_in_parses_response() {
    let (server, client) = common::setup_firebase_mock().await;
    common::mount_sign_in_ok(&server, "ann@example.com", Some("Ann")).await;

    let response = client
        .sign_in_with_password("ann@example.com", "secret1")
        .await
        .expect("sign_in_with_password failed");

    assert_eq!(response.local_id, "user-test-001");
    assert_eq!(response.email, "ann@example.com");
    assert_eq!(response.display_name.as_deref(), Some("Ann"));
    assert_eq!(response.id_token, "id-token-signin");
    assert_eq!(response.expires_in, "3600");
}

#[tokio::test]
async fn test_provider_sign_in_establishes_session() {
    let (server, provider) = common::setup_provider_mock().await;
    common::mount_sign_in_ok(&server, "ann@example.com", Some("Ann")).await;

    assert!(provider.current_user().is_none());

    let user = provider
        .sign_in("ann@example.com", "secret1")
        .await
        .expect("sign_in failed");

    assert_eq!(user.uid, "user-test-001");
    assert_eq!(user.email.as_deref(), Some("ann@example.com"));
    assert_eq!(user.display_name.as_deref(), Some("Ann"));

    assert_eq!(provider.current_user(), Some(user));
    assert!(provider.session_expires_at().is_some());
}

#[tokio::test]
async fn test_sign_in_error_surfaces_message_verbatim() {
    let (server, provider) = common::setup_provider_mock().await;
    common::mount_error(&server, "signInWithPassword", 400, "INVALID_PASSWORD").await;

    let err = provider
        .sign_in("ann@example.com", "wrong-pass")
        .await
        .expect_err("sign_in should fail");

    // The displayed error is exactly the provider message, nothing added.
    assert_eq!(err.to_string(), "INVALID_PASSWORD");
    let api_error = err
        .downcast_ref::<FirebaseApiError>()
        .expect("expected FirebaseApiError");
    assert_eq!(api_error.code, 400);

    assert!(provider.current_user().is_none());
}

#[tokio::test]
async fn test_sign_out_clears_session() {
    let (server, provider) = common::setup_provider_mock().await;
    common::mount_sign_in_ok(&server, "ann@example.com", None).await;

    provider
        .sign_in("ann@example.com", "secret1")
        .await
        .expect("sign_in failed");
    assert!(provider.current_user().is_some());

    provider.sign_out();
    assert!(provider.current_user().is_none());
    assert!(provider.session_expires_at().is_none());
}

#[tokio::test]
async fn test_undocumented_error_body_falls_back_to_status() {
    let server = wiremock::MockServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("POST"))
        .and(wiremock::matchers::path("/accounts:signInWithPassword"))
        .respond_with(wiremock::ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let provider = FirebaseIdentityProvider::new(
        studysphere_firebase::client::FirebaseClient::with_base_url(
            common::TEST_API_KEY,
            server.uri(),
        ),
    );

    let err = provider
        .sign_in("ann@example.com", "secret1")
        .await
        .expect_err("sign_in should fail");
    let api_error = err
        .downcast_ref::<FirebaseApiError>()
        .expect("expected FirebaseApiError");
    assert_eq!(api_error.code, 503);
}
