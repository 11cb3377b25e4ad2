//! Session lifecycle for the admin client.
//!
//! A session is the access token returned by login plus the cached user
//! profile. Both are persisted through a [`SessionStore`] under the keys in
//! [`keys`], and are always present together or absent together.
//!
//! The [`SessionManager`] is created once by the application's composition
//! root and handed to whatever needs it; there is no global session.
//! Instead of redirecting on its own, it returns a [`Navigation`] intent the
//! caller acts on.

pub mod manager;
pub mod store;

pub use manager::SessionManager;
pub use store::{FileStore, MemoryStore, SessionStore};

use secrecy::SecretString;

use depot_core::UserProfile;

/// Storage keys for the persisted session.
pub mod keys {
    /// Raw access token string.
    pub const ACCESS_TOKEN: &str = "accessToken";

    /// JSON-serialized [`depot_core::UserProfile`].
    pub const USER: &str = "user";

    /// Every key owned by the session.
    pub const ALL: [&str; 2] = [ACCESS_TOKEN, USER];
}

/// An authenticated session.
#[derive(Debug, Clone)]
pub struct Session {
    /// Bearer token for API calls.
    pub access_token: SecretString,
    /// Profile of the signed-in user.
    pub user: UserProfile,
}

/// What the caller should do after a session check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Stay on the current page.
    Stay,
    /// Send the user to `to` (the login page).
    Redirect {
        /// Target path.
        to: String,
    },
}

impl Navigation {
    /// Whether a redirect was requested.
    #[must_use]
    pub const fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect { .. })
    }
}

/// The login page and the area reachable without a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPaths {
    login_path: String,
    public_paths: Vec<String>,
}

impl SessionPaths {
    /// Create paths from a login path and the public prefixes.
    ///
    /// The login path is always treated as public.
    #[must_use]
    pub fn new(login_path: impl Into<String>, public_paths: Vec<String>) -> Self {
        let login_path = login_path.into();
        let mut public_paths = public_paths;
        if !public_paths.contains(&login_path) {
            public_paths.push(login_path.clone());
        }
        Self {
            login_path,
            public_paths,
        }
    }

    /// Path unauthenticated users are sent to.
    #[must_use]
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Whether `path` lies in the unauthenticated area.
    ///
    /// Query strings and fragments are ignored. A public entry matches
    /// itself and anything below it (`/login` matches `/login/reset`, not
    /// `/loginx`).
    #[must_use]
    pub fn is_public(&self, path: &str) -> bool {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        self.public_paths.iter().any(|public| {
            let public = public.trim_end_matches('/');
            public.is_empty()
                || path == public
                || path
                    .strip_prefix(public)
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    /// Redirect intent pointing at the login page.
    #[must_use]
    pub fn redirect_to_login(&self) -> Navigation {
        Navigation::Redirect {
            to: self.login_path.clone(),
        }
    }
}

impl Default for SessionPaths {
    fn default() -> Self {
        Self::new("/login", Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_path_is_public() {
        let paths = SessionPaths::default();
        assert!(paths.is_public("/login"));
        assert!(paths.is_public("/login?next=%2Forders"));
        assert!(paths.is_public("/login/"));
        assert!(!paths.is_public("/loginx"));
        assert!(!paths.is_public("/orders"));
        assert!(!paths.is_public("/"));
    }

    #[test]
    fn test_public_prefixes() {
        let paths = SessionPaths::new("/login", vec!["/public/".to_string()]);
        assert!(paths.is_public("/public"));
        assert!(paths.is_public("/public/help"));
        assert!(!paths.is_public("/publications"));
    }

    #[test]
    fn test_redirect_to_login() {
        let paths = SessionPaths::new("/signin", Vec::new());
        assert_eq!(
            paths.redirect_to_login(),
            Navigation::Redirect {
                to: "/signin".to_string()
            }
        );
        assert!(paths.is_public("/signin"));
        assert!(paths.redirect_to_login().is_redirect());
        assert!(!Navigation::Stay.is_redirect());
    }
}
