//! Session manager: login, logout, accessors, and start-up reconciliation.

use reqwest::{Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use depot_core::UserProfile;

use super::{Navigation, Session, SessionPaths, SessionStore, keys};
use crate::api::{ApiClient, auth};
use crate::error::{AuthError, Error, StorageError, clear_sentry_user, set_sentry_user};

/// What the store currently holds.
enum Stored {
    Empty,
    Complete(Session),
    Corrupt(&'static str),
}

/// Owns the persisted session.
///
/// Built once by the composition root and passed to whatever needs it.
pub struct SessionManager<S> {
    api: ApiClient,
    store: S,
    paths: SessionPaths,
}

impl<S: SessionStore> SessionManager<S> {
    /// Create a manager over `store`, logging in through `api`.
    #[must_use]
    pub const fn new(api: ApiClient, store: S, paths: SessionPaths) -> Self {
        Self { api, store, paths }
    }

    /// The API client used for login and authorized requests.
    #[must_use]
    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    /// The backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Login page and public area.
    #[must_use]
    pub const fn paths(&self) -> &SessionPaths {
        &self.paths
    }

    /// Log in and persist the resulting session.
    ///
    /// Token and profile are written in one store update. Nothing is written
    /// if the call fails. Concurrent calls are not serialized; the last one
    /// to finish wins.
    ///
    /// # Errors
    ///
    /// - `Error::Auth` when the API rejects the credentials or the response
    ///   lacks a token or profile
    /// - `Error::Network` on transport failure
    /// - `Error::Storage` when the session cannot be persisted
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<Session, Error> {
        let session = auth::login(&self.api, email, password).await?;
        self.persist(&session)?;

        set_sentry_user(session.user.id.as_i64(), session.user.email.as_str());
        tracing::info!(user_id = %session.user.id, role = %session.user.role, "Signed in");
        Ok(session)
    }

    /// Clear the session and return a redirect to the login page.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be updated.
    pub fn logout(&self) -> Result<Navigation, StorageError> {
        self.store.remove_all(&keys::ALL)?;
        clear_sentry_user();
        tracing::info!("Signed out");
        Ok(self.paths.redirect_to_login())
    }

    /// The stored access token, only while the session is complete.
    ///
    /// A token whose profile is missing or unreadable is not handed out.
    /// Storage failures are logged and reported as no token.
    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        match self.current_session() {
            Ok(session) => session.map(|session| session.access_token),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read access token");
                None
            }
        }
    }

    /// The cached profile of the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Corrupt` if the stored profile cannot be
    /// decoded, or `StorageError::Io` if storage cannot be read.
    pub fn user_profile(&self) -> Result<Option<UserProfile>, StorageError> {
        self.store
            .get(keys::USER)?
            .map(|raw| serde_json::from_str(&raw))
            .transpose()
            .map_err(StorageError::from)
    }

    /// The full session, when both halves are present and readable.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if storage cannot be read.
    pub fn current_session(&self) -> Result<Option<Session>, StorageError> {
        match self.load()? {
            Stored::Complete(session) => Ok(Some(session)),
            Stored::Empty | Stored::Corrupt(_) => Ok(None),
        }
    }

    /// Whether a complete session is stored.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self.current_session(), Ok(Some(_)))
    }

    /// Reconcile persisted state on start-up or page load.
    ///
    /// - Complete session: stay.
    /// - Token without profile (or the reverse), or an unreadable profile:
    ///   clear both keys and redirect to login.
    /// - No session: stay when `current_path` is public, otherwise redirect.
    ///
    /// Afterwards the store holds both keys or neither.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if storage cannot be read or cleared.
    #[instrument(skip(self))]
    pub fn initialize(&self, current_path: &str) -> Result<Navigation, StorageError> {
        let stored = match self.load() {
            Ok(stored) => stored,
            Err(StorageError::Corrupt(e)) => {
                tracing::warn!(error = %e, "Session storage unreadable");
                Stored::Corrupt("unreadable storage")
            }
            Err(e) => return Err(e),
        };

        match stored {
            Stored::Complete(session) => {
                set_sentry_user(session.user.id.as_i64(), session.user.email.as_str());
                Ok(Navigation::Stay)
            }
            Stored::Empty if self.paths.is_public(current_path) => Ok(Navigation::Stay),
            Stored::Empty => Ok(self.paths.redirect_to_login()),
            Stored::Corrupt(reason) => {
                tracing::warn!(reason, "Clearing inconsistent session");
                self.store.remove_all(&keys::ALL)?;
                clear_sentry_user();
                Ok(self.paths.redirect_to_login())
            }
        }
    }

    /// Start an API request carrying the stored bearer token.
    ///
    /// # Errors
    ///
    /// - `Error::Auth(AuthError::NotAuthenticated)` when no token is stored
    /// - `Error::InvalidPath` when `path` does not resolve on the API origin
    pub fn authorized_request(&self, method: Method, path: &str) -> Result<RequestBuilder, Error> {
        let token = self.token().ok_or(AuthError::NotAuthenticated)?;
        Ok(self.api.authorized(method, path, &token)?)
    }

    fn persist(&self, session: &Session) -> Result<(), StorageError> {
        let profile = serde_json::to_string(&session.user)?;
        self.store.set_all(&[
            (keys::ACCESS_TOKEN, session.access_token.expose_secret()),
            (keys::USER, &profile),
        ])
    }

    fn load(&self) -> Result<Stored, StorageError> {
        let token = self.store.get(keys::ACCESS_TOKEN)?;
        let user = self.store.get(keys::USER)?;

        Ok(match (token, user) {
            (None, None) => Stored::Empty,
            (Some(_), None) => Stored::Corrupt("token without profile"),
            (None, Some(_)) => Stored::Corrupt("profile without token"),
            (Some(token), Some(_)) if token.trim().is_empty() => Stored::Corrupt("empty token"),
            (Some(token), Some(raw)) => match serde_json::from_str::<UserProfile>(&raw) {
                Ok(user) => Stored::Complete(Session {
                    access_token: SecretString::from(token),
                    user,
                }),
                Err(_) => Stored::Corrupt("unreadable profile"),
            },
        })
    }
}
