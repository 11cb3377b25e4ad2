//! Warehouse API access.
//!
//! # Architecture
//!
//! - [`ApiClient`] joins request paths onto the configured base URL and
//!   attaches `Authorization: Bearer <token>` to authenticated calls
//! - [`auth::login`] performs `POST /auth/login` and turns the response into
//!   a [`crate::session::Session`]
//!
//! Nothing here retries or times out; failures go straight to the caller.

pub mod auth;
pub mod client;

pub use client::{ApiClient, EndpointError};
