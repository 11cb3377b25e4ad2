//! Session commands: login, logout, whoami, status.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (password from --password or DEPOT_PASSWORD)
//! depot login -e manager@depot.example
//!
//! # Show the signed-in user
//! depot whoami
//!
//! # Check what a screen at /orders would do on load
//! depot status --path /orders
//!
//! # Sign out
//! depot logout
//! ```

use secrecy::SecretString;
use tracing::{info, warn};

use depot_admin::{FileStore, Navigation, SessionManager};

use super::CliError;

/// Sign in and persist the session.
///
/// # Errors
///
/// Returns `CliError::MissingPassword` when no password is available, or the
/// login failure otherwise.
pub async fn login(
    sessions: &SessionManager<FileStore>,
    email: &str,
    password: Option<String>,
) -> Result<(), CliError> {
    let password = password
        .or_else(|| std::env::var("DEPOT_PASSWORD").ok())
        .filter(|p| !p.is_empty())
        .map(SecretString::from)
        .ok_or(CliError::MissingPassword)?;

    let session = sessions.login(email, &password).await?;
    info!(
        name = %session.user.name,
        email = %session.user.email,
        role = %session.user.role,
        "Signed in"
    );
    Ok(())
}

/// Clear the stored session.
///
/// # Errors
///
/// Returns `CliError::Storage` if the session file cannot be updated.
pub fn logout(sessions: &SessionManager<FileStore>) -> Result<(), CliError> {
    if let Navigation::Redirect { to } = sessions.logout()? {
        info!(next = %to, "Signed out");
    }
    Ok(())
}

/// Show the signed-in user's profile.
///
/// # Errors
///
/// Returns `CliError::NotSignedIn` when no complete session is stored.
pub fn whoami(sessions: &SessionManager<FileStore>) -> Result<(), CliError> {
    let session = sessions.current_session()?.ok_or(CliError::NotSignedIn)?;
    let user = &session.user;
    info!(
        id = %user.id,
        name = %user.name,
        email = %user.email,
        role = %user.role,
        phone = user.phone.as_deref().unwrap_or("-"),
        address = user.address.as_deref().unwrap_or("-"),
        cin = user.cin.as_deref().unwrap_or("-"),
        "Current user"
    );
    Ok(())
}

/// Reconcile the stored session as a page load at `path` would.
///
/// # Errors
///
/// Returns `CliError::Storage` if the session file cannot be read or cleared.
pub fn status(sessions: &SessionManager<FileStore>, path: &str) -> Result<(), CliError> {
    match sessions.initialize(path)? {
        Navigation::Stay if sessions.is_authenticated() => {
            info!(path, "Signed in; page can load");
        }
        Navigation::Stay => info!(path, "Not signed in; page is public"),
        Navigation::Redirect { to } => warn!(path, redirect = %to, "Redirect to login"),
    }
    Ok(())
}
