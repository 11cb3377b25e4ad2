//! HTTP client for the warehouse API.

use reqwest::{Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

/// A path that cannot be turned into an API URL.
#[derive(Debug, Error)]
pub enum EndpointError {
    /// The path does not parse relative to the base URL.
    #[error("Invalid API path: {0}")]
    Parse(#[from] url::ParseError),

    /// The path resolves to a different scheme, host or port.
    #[error("Path resolves outside the API origin: {0}")]
    ForeignOrigin(Url),
}

/// Thin wrapper around `reqwest::Client` bound to the API base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client with a default `reqwest::Client`.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    /// Create a client around an existing `reqwest::Client`.
    #[must_use]
    pub fn with_http_client(http: reqwest::Client, mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { http, base_url }
    }

    /// Base URL every path is resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an API path such as `/auth/login` against the base URL.
    ///
    /// Absolute URLs are accepted only when they stay on the API origin, so
    /// the bearer token is never sent elsewhere.
    ///
    /// # Errors
    ///
    /// - `EndpointError::Parse` if the path cannot be joined
    /// - `EndpointError::ForeignOrigin` if it points at another origin
    pub fn endpoint(&self, path: &str) -> Result<Url, EndpointError> {
        let url = self.base_url.join(path.trim_start_matches('/'))?;
        if url.origin() != self.base_url.origin() {
            return Err(EndpointError::ForeignOrigin(url));
        }
        Ok(url)
    }

    /// Start an unauthenticated request.
    ///
    /// # Errors
    ///
    /// Returns `EndpointError` if the path does not resolve on the API origin.
    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, EndpointError> {
        Ok(self.http.request(method, self.endpoint(path)?))
    }

    /// Start a request carrying `Authorization: Bearer <token>`.
    ///
    /// # Errors
    ///
    /// Returns `EndpointError` if the path does not resolve on the API origin.
    pub fn authorized(
        &self,
        method: Method,
        path: &str,
        token: &SecretString,
    ) -> Result<RequestBuilder, EndpointError> {
        Ok(self.request(method, path)?.bearer_auth(token.expose_secret()))
    }
}
