//! Integration tests for Depot.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p depot-integration-tests
//! ```
//!
//! The tests start an in-process mock of the warehouse API (see
//! [`MockApi`]) on an ephemeral port, so no external services are needed.
//!
//! # Test Categories
//!
//! - `session_flow` - login, logout, start-up reconciliation, bearer requests
//! - `import_flow` - spreadsheet submission behind a signed-in session

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use url::Url;

use depot_admin::{ApiClient, SessionManager, SessionPaths, SessionStore};

/// Email accepted by the mock login endpoint.
pub const VALID_EMAIL: &str = "salma@depot.example";
/// Password accepted by the mock login endpoint.
pub const VALID_PASSWORD: &str = "correct horse";
/// Access token issued on a successful mock login.
pub const ISSUED_TOKEN: &str = "tok-3f9a";

/// How the mock login endpoint answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginBehavior {
    /// 200 with token and profile for valid credentials, 401 otherwise.
    Standard,
    /// 200 with a profile but no token.
    OmitToken,
    /// 200 with a token but no profile.
    OmitProfile,
    /// 200 with an HTML body.
    NotJson,
    /// 503 with a plain-text body.
    Unavailable,
    /// Like `Standard`, but the profile carries a role outside the known set.
    UnlistedRole,
}

struct MockState {
    behavior: LoginBehavior,
    login_calls: AtomicUsize,
}

/// A running mock of the warehouse API.
///
/// The server stops when this value is dropped.
pub struct MockApi {
    base_url: Url,
    state: Arc<MockState>,
    handle: JoinHandle<()>,
}

impl MockApi {
    /// Start a mock API on `127.0.0.1` with an ephemeral port.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the listener cannot be bound.
    pub async fn start(behavior: LoginBehavior) -> std::io::Result<Self> {
        let state = Arc::new(MockState {
            behavior,
            login_calls: AtomicUsize::new(0),
        });

        let app = Router::new()
            .route("/auth/login", post(login))
            .route("/orders", get(orders))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let base_url = Url::parse(&format!("http://{addr}/"))
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        Ok(Self {
            base_url,
            state,
            handle,
        })
    }

    /// Base URL of the mock API, with a trailing slash.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Number of login requests received so far.
    #[must_use]
    pub fn login_calls(&self) -> usize {
        self.state.login_calls.load(Ordering::SeqCst)
    }

    /// An API client pointed at this mock.
    #[must_use]
    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.base_url.clone())
    }

    /// A session manager over `store` that logs in against this mock.
    #[must_use]
    pub fn sessions<S: SessionStore>(&self, store: S) -> SessionManager<S> {
        SessionManager::new(self.client(), store, SessionPaths::default())
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Profile returned for [`VALID_EMAIL`].
#[must_use]
pub fn profile_json() -> Value {
    json!({
        "id": 12,
        "email": VALID_EMAIL,
        "name": "Salma Idrissi",
        "phone": "+212 600 000 000",
        "address": "12 Rue de Fes, Rabat",
        "cin": "AB123456",
        "role": "MANAGER"
    })
}

#[derive(Deserialize)]
struct Credentials {
    email: String,
    password: String,
}

async fn login(State(state): State<Arc<MockState>>, Json(body): Json<Credentials>) -> Response {
    state.login_calls.fetch_add(1, Ordering::SeqCst);

    match state.behavior {
        LoginBehavior::Standard => {
            if body.email == VALID_EMAIL && body.password == VALID_PASSWORD {
                Json(json!({ "accessToken": ISSUED_TOKEN, "userDTO": profile_json() }))
                    .into_response()
            } else {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "message": "Bad credentials" })),
                )
                    .into_response()
            }
        }
        LoginBehavior::UnlistedRole => {
            let mut profile = profile_json();
            profile["role"] = json!("SUPERVISOR");
            Json(json!({ "accessToken": ISSUED_TOKEN, "userDTO": profile })).into_response()
        }
        LoginBehavior::OmitToken => Json(json!({ "userDTO": profile_json() })).into_response(),
        LoginBehavior::OmitProfile => Json(json!({ "accessToken": ISSUED_TOKEN })).into_response(),
        LoginBehavior::NotJson => (
            [(header::CONTENT_TYPE, "text/html")],
            "<html><body>Welcome</body></html>",
        )
            .into_response(),
        LoginBehavior::Unavailable => {
            (StatusCode::SERVICE_UNAVAILABLE, "upstream down").into_response()
        }
    }
}

async fn orders(headers: HeaderMap) -> Response {
    let expected = format!("Bearer {ISSUED_TOKEN}");
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == expected);

    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    Json(json!([{
        "id": 1,
        "orderNumber": "ORD-0001",
        "customerName": "Atlas Foods",
        "product": "Olive oil 5L",
        "quantity": 40,
        "warehouse": "Casablanca North",
        "status": "PROCESSING",
        "date": "2024-03-01"
    }]))
    .into_response()
}
