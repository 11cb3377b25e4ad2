//! Login against the warehouse API.
//!
//! `POST /auth/login` with `{email, password}`; a successful response is
//! `{accessToken, userDTO}`.

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use depot_core::UserProfile;

use super::ApiClient;
use crate::error::{AuthError, Error};
use crate::session::Session;

/// Login endpoint, relative to the API base URL.
pub const LOGIN_PATH: &str = "/auth/login";

/// Request body for the login endpoint.
#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Response body from the login endpoint.
#[derive(Deserialize)]
struct LoginResponse {
    #[serde(default, rename = "accessToken")]
    access_token: Option<String>,
    #[serde(default, rename = "userDTO")]
    user: Option<UserProfile>,
}

/// Error body the API may send alongside a non-success status.
#[derive(Deserialize)]
struct LoginErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Authenticate with email and password.
///
/// Returns the session described by the response; nothing is persisted here.
///
/// # Errors
///
/// - `Error::Network` if the request cannot be sent or its body cannot be read
/// - `Error::Auth(AuthError::Rejected)` for a non-success status
/// - `Error::Auth(AuthError::MissingToken)` when the response has no token
/// - `Error::Auth(AuthError::MissingProfile)` when the response has no `userDTO`
/// - `Error::Auth(AuthError::MalformedResponse)` when the body is not the expected JSON
#[instrument(skip(client, password), fields(email = %email))]
pub async fn login(
    client: &ApiClient,
    email: &str,
    password: &SecretString,
) -> Result<Session, Error> {
    let response = client
        .request(Method::POST, LOGIN_PATH)?
        .json(&LoginRequest {
            email,
            password: password.expose_secret(),
        })
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), "Login rejected");
        return Err(AuthError::Rejected {
            status: status.as_u16(),
            message: rejection_message(&body),
        }
        .into());
    }

    let parsed: LoginResponse = serde_json::from_str(&body)
        .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;

    Ok(session_from_response(parsed)?)
}

/// Both the token and the profile must be present for a session to exist.
fn session_from_response(response: LoginResponse) -> Result<Session, AuthError> {
    let token = response
        .access_token
        .filter(|t| !t.trim().is_empty())
        .ok_or(AuthError::MissingToken)?;
    let user = response.user.ok_or(AuthError::MissingProfile)?;

    Ok(Session {
        access_token: SecretString::from(token),
        user,
    })
}

fn rejection_message(body: &str) -> String {
    serde_json::from_str::<LoginErrorResponse>(body)
        .ok()
        .and_then(|e| e.message.or(e.error))
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.chars().take(200).collect())
        })
        .unwrap_or_else(|| "Invalid credentials".to_string())
}
