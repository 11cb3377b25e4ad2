//! Error types for session and API operations.

use thiserror::Error;

use crate::api::client::EndpointError;

/// Authentication failures.
///
/// These bubble to the caller unchanged; the consuming screen decides how
/// to show them.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The API answered the login call with a non-success status.
    #[error("Login rejected (HTTP {status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// The login response carried no (or an empty) access token.
    #[error("Login response did not include an access token")]
    MissingToken,

    /// The login response carried a token but no user profile.
    #[error("Login response did not include a user profile")]
    MissingProfile,

    /// The login response body could not be decoded.
    #[error("Malformed login response: {0}")]
    MalformedResponse(String),

    /// An authenticated call was attempted with no stored session.
    #[error("Not authenticated")]
    NotAuthenticated,
}

/// Failures reading or writing persisted session state.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("Session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be decoded.
    #[error("Corrupt session data: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Umbrella error for session manager operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Authentication failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Transport failure, propagated unchanged.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Session storage failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A request path does not resolve on the API origin.
    #[error(transparent)]
    InvalidPath(#[from] EndpointError),
}

impl Error {
    /// Whether the failure is an authentication problem the user can fix
    /// by signing in again.
    #[must_use]
    pub const fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}

/// Set the Sentry user context after a successful login.
pub fn set_sentry_user(user_id: i64, email: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: Some(email.to_owned()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}
