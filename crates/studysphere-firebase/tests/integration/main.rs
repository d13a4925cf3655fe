//! Integration tests for studysphere-firebase
//!
//! Uses wiremock to simulate the Firebase Identity Toolkit API and
//! verifies end-to-end behavior of the FirebaseClient, the provider
//! adapter, and the authentication flow running on top of them.

mod common;

mod test_sign_in;
mod test_registration;
mod test_auth_flow;
