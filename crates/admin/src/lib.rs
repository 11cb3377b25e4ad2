//! Depot Admin library.
//!
//! Client-side logic behind the warehouse back office:
//! - [`session`] - login, logout, persisted token + profile, start-up checks
//! - [`api`] - HTTP access to the warehouse API with bearer authentication
//! - [`import`] - spreadsheet import submission (mock backend)
//! - [`config`] - environment-based configuration
//!
//! Form validation lives in `depot-core`.
//!
//! # Composition
//!
//! ```no_run
//! use depot_admin::{AdminConfig, ApiClient, FileStore, SessionManager};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AdminConfig::from_env()?;
//! let sessions = SessionManager::new(
//!     ApiClient::new(config.api_url.clone()),
//!     FileStore::new(&config.session_file),
//!     config.session_paths(),
//! );
//!
//! if sessions.initialize("/orders")?.is_redirect() {
//!     // show the login screen
//! }
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod import;
pub mod session;

pub use api::{ApiClient, EndpointError};
pub use config::{AdminConfig, ConfigError};
pub use error::{AuthError, Error, StorageError};
pub use import::{ImportBackend, ImportKind, ImportReceipt, ImportRequest, MockImportBackend};
pub use session::{
    FileStore, MemoryStore, Navigation, Session, SessionManager, SessionPaths, SessionStore,
};
