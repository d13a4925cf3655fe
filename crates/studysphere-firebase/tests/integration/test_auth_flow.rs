//! End-to-end authentication flow tests
//!
//! Runs the AuthenticateUseCase against the Firebase adapter with a
//! mocked Identity Toolkit backend, verifying the flow-level behavior
//! that unit tests cover with fakes: session gating, verbatim provider
//! messages, and the registration sequence.

use std::sync::Arc;

use studysphere_core::domain::{AuthError, Credentials, RegistrationRequest};
use studysphere_core::usecases::AuthenticateUseCase;

use crate::common::{self, RecordingNotifier};

async fn setup_flow() -> (
    wiremock::MockServer,
    AuthenticateUseCase,
    Arc<RecordingNotifier>,
) {
    let (server, provider) = common::setup_provider_mock().await;
    let notifier = Arc::new(RecordingNotifier::default());
    let usecase = AuthenticateUseCase::new(Arc::new(provider), notifier.clone());
    (server, usecase, notifier)
}

#[tokio::test]
async fn test_login_flow_authenticates_session() {
    let (server, usecase, notifier) = setup_flow().await;
    common::mount_sign_in_ok(&server, "ann@example.com", Some("Ann")).await;

    assert!(!usecase.current_session().is_authenticated());

    let session = usecase
        .submit_login(&Credentials::new("ann@example.com", "secret1"))
        .await
        .expect("login failed");

    assert!(session.is_authenticated());
    assert_eq!(session.display_name(), Some("Ann"));
    assert!(usecase.current_session().is_authenticated());
    assert_eq!(notifier.busy_events(), vec![true, false]);
    assert_eq!(notifier.error_count(), 0);
}

#[tokio::test]
async fn test_login_flow_surfaces_firebase_message() {
    let (server, usecase, notifier) = setup_flow().await;
    common::mount_error(&server, "signInWithPassword", 400, "EMAIL_NOT_FOUND").await;

    let result = usecase
        .submit_login(&Credentials::new("ann@example.com", "secret1"))
        .await;

    assert_eq!(
        result,
        Err(AuthError::Provider("EMAIL_NOT_FOUND".to_string()))
    );

    let notifications = notifier.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].body, "EMAIL_NOT_FOUND");
    assert!(!usecase.current_session().is_authenticated());
}

#[tokio::test]
async fn test_registration_flow_sets_display_name() {
    let (server, usecase, notifier) = setup_flow().await;
    common::mount_sign_up_ok(&server, "ann@example.com").await;
    common::mount_update_ok(&server, "ann@example.com", "Ann").await;

    let session = usecase
        .submit_registration(&RegistrationRequest::new("Ann", "ann@example.com", "secret1"))
        .await
        .expect("registration failed");

    assert!(session.is_authenticated());
    assert_eq!(session.display_name(), Some("Ann"));
    assert_eq!(notifier.error_count(), 0);
    assert_eq!(notifier.notifications()[0].title, "Registration successful");
}

#[tokio::test]
async fn test_registration_flow_tolerates_update_failure() {
    let (server, usecase, notifier) = setup_flow().await;
    common::mount_sign_up_ok(&server, "ann@example.com").await;
    common::mount_error(&server, "update", 400, "INVALID_ID_TOKEN").await;

    let session = usecase
        .submit_registration(&RegistrationRequest::new("Ann", "ann@example.com", "secret1"))
        .await
        .expect("registration should still succeed");

    // The account exists and the session is live; only the name is missing.
    assert!(session.is_authenticated());
    assert_eq!(session.display_name(), None);
    assert!(usecase.current_session().is_authenticated());
    assert_eq!(notifier.error_count(), 1);
}

#[tokio::test]
async fn test_logout_flow_clears_provider_session() {
    let (server, usecase, _notifier) = setup_flow().await;
    common::mount_sign_in_ok(&server, "ann@example.com", Some("Ann")).await;

    usecase
        .submit_login(&Credentials::new("ann@example.com", "secret1"))
        .await
        .expect("login failed");
    assert!(usecase.current_session().is_authenticated());

    let session = usecase.logout();
    assert!(!session.is_authenticated());
    assert!(!usecase.current_session().is_authenticated());
}
