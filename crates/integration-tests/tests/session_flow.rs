//! Integration tests for the session lifecycle against the mock API.
//!
//! Run with: cargo test -p depot-integration-tests --test `session_flow`

use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};

use depot_admin::session::keys;
use depot_admin::{AuthError, Error, FileStore, MemoryStore, Navigation, SessionStore};
use depot_core::{Order, UserRole};
use depot_integration_tests::{
    ISSUED_TOKEN, LoginBehavior, MockApi, VALID_EMAIL, VALID_PASSWORD,
};

fn password(value: &str) -> SecretString {
    SecretString::from(value)
}

async fn mock(behavior: LoginBehavior) -> MockApi {
    MockApi::start(behavior)
        .await
        .expect("Failed to start mock API")
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_persists_token_and_profile() {
    let api = mock(LoginBehavior::Standard).await;
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(".depot").join("session.json");
    let sessions = api.sessions(FileStore::new(&path));

    let session = sessions
        .login(VALID_EMAIL, &password(VALID_PASSWORD))
        .await
        .expect("Login should succeed");

    assert_eq!(session.access_token.expose_secret(), ISSUED_TOKEN);
    assert_eq!(session.user.role, UserRole::Manager);
    assert_eq!(session.user.cin.as_deref(), Some("AB123456"));

    assert!(sessions.is_authenticated());
    assert_eq!(
        sessions.token().expect("Token should be stored").expose_secret(),
        ISSUED_TOKEN
    );
    let profile = sessions
        .user_profile()
        .expect("Profile should be readable")
        .expect("Profile should be stored");
    assert_eq!(profile.name, "Salma Idrissi");
    assert_eq!(profile.email.as_str(), VALID_EMAIL);

    // A fresh manager over the same file sees the same session
    let reopened = api.sessions(FileStore::new(&path));
    assert_eq!(reopened.initialize("/orders").expect("initialize"), Navigation::Stay);
    assert!(reopened.is_authenticated());
}

#[tokio::test]
async fn test_login_with_unlisted_role() {
    let api = mock(LoginBehavior::UnlistedRole).await;
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let sessions = api.sessions(FileStore::new(dir.path().join("session.json")));

    let session = sessions
        .login(VALID_EMAIL, &password(VALID_PASSWORD))
        .await
        .expect("Unlisted roles should still sign in");
    assert_eq!(session.user.role, UserRole::Other("SUPERVISOR".to_string()));

    assert_eq!(sessions.initialize("/orders").expect("initialize"), Navigation::Stay);
    assert!(sessions.is_authenticated());
}

#[tokio::test]
async fn test_login_with_wrong_password_writes_nothing() {
    let api = mock(LoginBehavior::Standard).await;
    let sessions = api.sessions(MemoryStore::new());

    let err = sessions
        .login(VALID_EMAIL, &password("wrong"))
        .await
        .expect_err("Login should be rejected");

    match err {
        Error::Auth(AuthError::Rejected { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Bad credentials");
        }
        other => panic!("Unexpected error: {other:?}"),
    }
    assert_eq!(sessions.store().writes(), 0);
    assert!(!sessions.is_authenticated());
    assert_eq!(api.login_calls(), 1);
}

#[tokio::test]
async fn test_login_keeps_existing_session_on_failure() {
    let api = mock(LoginBehavior::Standard).await;
    let sessions = api.sessions(MemoryStore::new());
    sessions
        .login(VALID_EMAIL, &password(VALID_PASSWORD))
        .await
        .expect("First login should succeed");

    let _ = sessions
        .login(VALID_EMAIL, &password("wrong"))
        .await
        .expect_err("Second login should fail");

    assert_eq!(sessions.store().writes(), 1);
    assert!(sessions.is_authenticated());
}

#[tokio::test]
async fn test_login_response_without_token() {
    let api = mock(LoginBehavior::OmitToken).await;
    let sessions = api.sessions(MemoryStore::new());

    let err = sessions
        .login(VALID_EMAIL, &password(VALID_PASSWORD))
        .await
        .expect_err("Login without token should fail");

    assert!(matches!(err, Error::Auth(AuthError::MissingToken)));
    assert!(err.is_auth());
    assert_eq!(sessions.store().writes(), 0);
}

#[tokio::test]
async fn test_login_response_without_profile() {
    let api = mock(LoginBehavior::OmitProfile).await;
    let sessions = api.sessions(MemoryStore::new());

    let err = sessions
        .login(VALID_EMAIL, &password(VALID_PASSWORD))
        .await
        .expect_err("Login without profile should fail");

    assert!(matches!(err, Error::Auth(AuthError::MissingProfile)));
    assert!(!sessions.store().contains(keys::ACCESS_TOKEN));
}

#[tokio::test]
async fn test_login_response_not_json() {
    let api = mock(LoginBehavior::NotJson).await;
    let sessions = api.sessions(MemoryStore::new());

    let err = sessions
        .login(VALID_EMAIL, &password(VALID_PASSWORD))
        .await
        .expect_err("HTML body should fail");

    assert!(matches!(err, Error::Auth(AuthError::MalformedResponse(_))));
    assert_eq!(sessions.store().writes(), 0);
}

#[tokio::test]
async fn test_login_server_error_uses_body_as_message() {
    let api = mock(LoginBehavior::Unavailable).await;
    let sessions = api.sessions(MemoryStore::new());

    let err = sessions
        .login(VALID_EMAIL, &password(VALID_PASSWORD))
        .await
        .expect_err("503 should fail");

    match err {
        Error::Auth(AuthError::Rejected { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "upstream down");
        }
        other => panic!("Unexpected error: {other:?}"),
    }
}

// ============================================================================
// Logout & start-up
// ============================================================================

#[tokio::test]
async fn test_logout_clears_session_file() {
    let api = mock(LoginBehavior::Standard).await;
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("session.json");
    let sessions = api.sessions(FileStore::new(&path));

    sessions
        .login(VALID_EMAIL, &password(VALID_PASSWORD))
        .await
        .expect("Login should succeed");
    assert!(path.exists());

    let nav = sessions.logout().expect("Logout should succeed");
    assert_eq!(
        nav,
        Navigation::Redirect {
            to: "/login".to_string()
        }
    );
    assert!(!path.exists());
    assert!(sessions.token().is_none());
    assert!(sessions.initialize("/orders").expect("initialize").is_redirect());
}

#[tokio::test]
async fn test_initialize_repairs_half_written_file() {
    let api = mock(LoginBehavior::Standard).await;
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = FileStore::new(dir.path().join("session.json"));
    store
        .set_all(&[(keys::ACCESS_TOKEN, "stale-token")])
        .expect("Failed to seed store");

    let sessions = api.sessions(store);
    assert!(sessions.initialize("/login").expect("initialize").is_redirect());

    let store = sessions.store();
    assert_eq!(store.get(keys::ACCESS_TOKEN).expect("read"), None);
    assert_eq!(store.get(keys::USER).expect("read"), None);
}

#[tokio::test]
async fn test_initialize_repairs_corrupt_file() {
    let api = mock(LoginBehavior::Standard).await;
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{\"accessToken\": ").expect("Failed to write file");

    let sessions = api.sessions(FileStore::new(&path));
    assert!(sessions.initialize("/products").expect("initialize").is_redirect());
    assert!(!path.exists());
}

// ============================================================================
// Authorized requests
// ============================================================================

#[tokio::test]
async fn test_authorized_request_sends_bearer_token() {
    let api = mock(LoginBehavior::Standard).await;
    let sessions = api.sessions(MemoryStore::new());
    sessions
        .login(VALID_EMAIL, &password(VALID_PASSWORD))
        .await
        .expect("Login should succeed");

    let resp = sessions
        .authorized_request(Method::GET, "/orders")
        .expect("Request should build")
        .send()
        .await
        .expect("Request should be sent");
    assert_eq!(resp.status(), StatusCode::OK);

    let orders: Vec<Order> = resp.json().await.expect("Orders should decode");
    let [order] = orders.as_slice() else {
        panic!("Expected one order, got {}", orders.len());
    };
    assert_eq!(order.order_number, "ORD-0001");
    assert_eq!(order.quantity, 40);
}

#[tokio::test]
async fn test_unauthenticated_request_is_refused_locally() {
    let api = mock(LoginBehavior::Standard).await;
    let sessions = api.sessions(MemoryStore::new());

    let err = sessions
        .authorized_request(Method::GET, "/orders")
        .expect_err("No token should be available");
    assert!(matches!(err, Error::Auth(AuthError::NotAuthenticated)));

    // The endpoint itself refuses anonymous calls
    let resp = api
        .client()
        .request(Method::GET, "/orders")
        .expect("Request should build")
        .send()
        .await
        .expect("Request should be sent");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
