//! Admin client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DEPOT_API_URL` - Base URL of the warehouse API (e.g. `https://api.depot.example/`)
//!
//! ## Optional
//! - `DEPOT_SESSION_FILE` - Where the session is persisted (default: `.depot/session.json`)
//! - `DEPOT_LOGIN_PATH` - Path unauthenticated users are sent to (default: `/login`)
//! - `DEPOT_PUBLIC_PATHS` - Comma-separated paths reachable without a session (default: `/login`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (default: 1.0)

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::session::SessionPaths;

const DEFAULT_SESSION_FILE: &str = ".depot/session.json";
const DEFAULT_LOGIN_PATH: &str = "/login";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin client configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Base URL of the warehouse API
    pub api_url: Url,
    /// File holding the persisted session
    pub session_file: PathBuf,
    /// Path unauthenticated users are redirected to
    pub login_path: String,
    /// Paths reachable without a session
    pub public_paths: Vec<String>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<SecretString>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = parse_api_url(
            &get("DEPOT_API_URL")
                .ok_or_else(|| ConfigError::MissingEnvVar("DEPOT_API_URL".to_string()))?,
        )?;

        let session_file = PathBuf::from(
            get("DEPOT_SESSION_FILE").unwrap_or_else(|| DEFAULT_SESSION_FILE.to_string()),
        );

        let login_path = get("DEPOT_LOGIN_PATH").unwrap_or_else(|| DEFAULT_LOGIN_PATH.to_string());
        validate_app_path("DEPOT_LOGIN_PATH", &login_path)?;

        let public_paths = match get("DEPOT_PUBLIC_PATHS") {
            Some(raw) => parse_path_list("DEPOT_PUBLIC_PATHS", &raw)?,
            None => vec![login_path.clone()],
        };

        let sentry_sample_rate = match get("SENTRY_SAMPLE_RATE") {
            Some(raw) => parse_sample_rate(&raw)?,
            None => 1.0,
        };

        Ok(Self {
            api_url,
            session_file,
            login_path,
            public_paths,
            sentry_dsn: get("SENTRY_DSN").map(SecretString::from),
            sentry_environment: get("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
        })
    }

    /// Login path and public area for the session manager.
    #[must_use]
    pub fn session_paths(&self) -> SessionPaths {
        SessionPaths::new(self.login_path.clone(), self.public_paths.clone())
    }
}

/// Parse the API base URL, forcing a trailing slash so relative joins
/// append to it instead of replacing its last segment.
fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar("DEPOT_API_URL".to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "DEPOT_API_URL".to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn validate_app_path(var: &str, path: &str) -> Result<(), ConfigError> {
    if path.starts_with('/') {
        Ok(())
    } else {
        Err(ConfigError::InvalidEnvVar(
            var.to_string(),
            format!("'{path}' must start with '/'"),
        ))
    }
}

fn parse_path_list(var: &str, raw: &str) -> Result<Vec<String>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| validate_app_path(var, p).map(|()| p.to_string()))
        .collect()
}

fn parse_sample_rate(raw: &str) -> Result<f32, ConfigError> {
    let rate = raw
        .trim()
        .parse::<f32>()
        .map_err(|e| ConfigError::InvalidEnvVar("SENTRY_SAMPLE_RATE".to_string(), e.to_string()))?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            "SENTRY_SAMPLE_RATE".to_string(),
            format!("{rate} is outside 0.0..=1.0"),
        ))
    }
}
