//! CLI subcommand implementations.

pub mod import;
pub mod session;
pub mod validate;

use std::path::PathBuf;

use thiserror::Error;

use depot_admin::import::ImportError;
use depot_admin::{ConfigError, StorageError};

/// Errors that end a CLI command with a non-zero exit.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Login or an API call failed.
    #[error(transparent)]
    Session(#[from] depot_admin::Error),

    /// Session storage failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The import was refused.
    #[error(transparent)]
    Import(#[from] ImportError),

    /// An input file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An input file is not a valid draft.
    #[error("Failed to parse {}: {source}", path.display())]
    ParseInput {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// No password was supplied for login.
    #[error("Missing password: pass --password or set DEPOT_PASSWORD")]
    MissingPassword,

    /// The command needs a stored session.
    #[error("Not signed in; run `depot login` first")]
    NotSignedIn,

    /// The draft failed validation.
    #[error("Validation failed with {0} field error(s)")]
    Invalid(usize),
}
