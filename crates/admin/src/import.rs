//! Spreadsheet import.
//!
//! The import screen uploads an Excel workbook of orders, products,
//! warehouses or shipments. No backend parses these files yet, so [`MockImportBackend`]
//! only checks the file and hands back a pending receipt; row-level parsing
//! is left to whichever [`ImportBackend`] replaces it.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// File extensions accepted by the import screen.
pub const ACCEPTED_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

/// Errors raised before or during submission of an import.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file has no content.
    #[error("File is empty: {}", .0.display())]
    Empty(PathBuf),

    /// The file is not an Excel workbook.
    #[error("Unsupported file type {}; expected .xlsx or .xls", .0.as_deref().unwrap_or("(none)"))]
    UnsupportedType(Option<String>),

    /// Reading file metadata failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which records a workbook contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportKind {
    Orders,
    Products,
    Warehouses,
    Shipments,
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Orders => write!(f, "orders"),
            Self::Products => write!(f, "products"),
            Self::Warehouses => write!(f, "warehouses"),
            Self::Shipments => write!(f, "shipments"),
        }
    }
}

impl std::str::FromStr for ImportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "orders" => Ok(Self::Orders),
            "products" => Ok(Self::Products),
            "warehouses" => Ok(Self::Warehouses),
            "shipments" => Ok(Self::Shipments),
            _ => Err(format!(
                "invalid import kind: {s} (expected orders, products, warehouses or shipments)"
            )),
        }
    }
}

/// A workbook ready to be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRequest {
    pub path: PathBuf,
    pub file_name: String,
    pub size_bytes: u64,
    pub kind: ImportKind,
}

impl ImportRequest {
    /// Check `path` and describe it as an import of `kind`.
    ///
    /// # Errors
    ///
    /// - `ImportError::UnsupportedType` if the extension is not `.xlsx`/`.xls`
    /// - `ImportError::NotFound` if the file does not exist
    /// - `ImportError::Empty` if the file has no content
    pub fn from_path(path: impl AsRef<Path>, kind: ImportKind) -> Result<Self, ImportError> {
        let path = path.as_ref();

        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase());
        if !extension
            .as_deref()
            .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext))
        {
            return Err(ImportError::UnsupportedType(extension));
        }

        let metadata = match std::fs::metadata(path) {
            Ok(metadata) if metadata.is_file() => metadata,
            Ok(_) => return Err(ImportError::NotFound(path.to_path_buf())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ImportError::NotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };
        if metadata.len() == 0 {
            return Err(ImportError::Empty(path.to_path_buf()));
        }

        Ok(Self {
            path: path.to_path_buf(),
            file_name: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            size_bytes: metadata.len(),
            kind,
        })
    }
}

/// Processing state of a submitted import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ImportStatus {
    /// Accepted, waiting for a parser.
    Pending,
}

/// Acknowledgement returned for a submitted import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReceipt {
    pub id: Uuid,
    pub file_name: String,
    pub size_bytes: u64,
    pub kind: ImportKind,
    pub submitted_at: DateTime<Utc>,
    pub status: ImportStatus,
}

/// Something that accepts workbook imports.
pub trait ImportBackend {
    /// Submit a checked workbook.
    ///
    /// # Errors
    ///
    /// Returns `ImportError` if the backend refuses the file.
    fn submit(&self, request: &ImportRequest) -> Result<ImportReceipt, ImportError>;
}

/// Stand-in backend that accepts every checked workbook without reading it.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockImportBackend;

impl ImportBackend for MockImportBackend {
    fn submit(&self, request: &ImportRequest) -> Result<ImportReceipt, ImportError> {
        let receipt = ImportReceipt {
            id: Uuid::new_v4(),
            file_name: request.file_name.clone(),
            size_bytes: request.size_bytes,
            kind: request.kind,
            submitted_at: Utc::now(),
            status: ImportStatus::Pending,
        };
        tracing::info!(
            import_id = %receipt.id,
            file = %receipt.file_name,
            kind = %receipt.kind,
            size_bytes = receipt.size_bytes,
            "Import queued (no parser connected)"
        );
        Ok(receipt)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_kind_from_str() {
        assert_eq!("Orders".parse::<ImportKind>(), Ok(ImportKind::Orders));
        assert_eq!(" shipments".parse::<ImportKind>(), Ok(ImportKind::Shipments));
        assert!("pallets".parse::<ImportKind>().is_err());
    }

    #[test]
    fn test_rejects_other_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.csv");
        fs::write(&path, "a,b\n").unwrap();

        let err = ImportRequest::from_path(&path, ImportKind::Orders).unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedType(Some(ref ext)) if ext == "csv"));

        let err = ImportRequest::from_path(dir.path().join("orders"), ImportKind::Orders)
            .unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedType(None)));
    }

    #[test]
    fn test_missing_and_empty_files() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.xlsx");
        assert!(matches!(
            ImportRequest::from_path(&missing, ImportKind::Products),
            Err(ImportError::NotFound(_))
        ));

        let empty = dir.path().join("empty.XLS");
        fs::write(&empty, b"").unwrap();
        assert!(matches!(
            ImportRequest::from_path(&empty, ImportKind::Products),
            Err(ImportError::Empty(_))
        ));
    }

    #[test]
    fn test_mock_backend_returns_pending_receipt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stock.xlsx");
        fs::write(&path, b"PK\x03\x04fake workbook").unwrap();

        let request = ImportRequest::from_path(&path, ImportKind::Warehouses).unwrap();
        assert_eq!(request.file_name, "stock.xlsx");
        assert_eq!(request.size_bytes, 17);

        let receipt = MockImportBackend.submit(&request).unwrap();
        assert_eq!(receipt.status, ImportStatus::Pending);
        assert_eq!(receipt.kind, ImportKind::Warehouses);
        assert_eq!(receipt.file_name, "stock.xlsx");

        let other = MockImportBackend.submit(&request).unwrap();
        assert_ne!(receipt.id, other.id);
    }
}
