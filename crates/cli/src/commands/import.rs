//! Spreadsheet import command.
//!
//! # Usage
//!
//! ```bash
//! depot import stock.xlsx --kind products
//! ```

use std::path::Path;

use tracing::info;

use depot_admin::import::{ImportBackend, ImportKind, ImportRequest};
use depot_admin::{SessionManager, SessionStore};

use super::CliError;

/// Submit a workbook to `backend`. Requires a signed-in session.
///
/// # Errors
///
/// Returns `CliError::NotSignedIn` without a session, or `CliError::Import`
/// if the file is refused.
pub fn submit<S: SessionStore>(
    sessions: &SessionManager<S>,
    backend: &impl ImportBackend,
    path: &Path,
    kind: ImportKind,
) -> Result<(), CliError> {
    if !sessions.is_authenticated() {
        return Err(CliError::NotSignedIn);
    }

    let request = ImportRequest::from_path(path, kind)?;
    let receipt = backend.submit(&request)?;
    info!(
        import_id = %receipt.id,
        file = %receipt.file_name,
        kind = %receipt.kind,
        submitted_at = %receipt.submitted_at,
        "Import submitted; rows will be processed once a parser is connected"
    );
    Ok(())
}
