//! Validate drafts from YAML or JSON files.
//!
//! # Usage
//!
//! ```bash
//! depot validate order draft.yaml --warehouse "Casablanca North" --warehouse "Rabat Port"
//! depot validate order edit.yaml --original order.yaml --warehouse "Rabat Port"
//! depot validate product product.json
//! ```

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use depot_core::{
    FieldErrors, OrderDraft, ProductDraft, ShipmentDraft, UserDraft, WarehouseDraft,
    validate_order, validate_order_edit, validate_product, validate_shipment, validate_user,
    validate_warehouse,
};

use super::CliError;

/// Validate an order draft, optionally as an edit of `original`.
///
/// # Errors
///
/// Returns `CliError::Invalid` when the draft has field errors, or an input
/// error if a file cannot be read.
pub async fn order(
    path: &Path,
    original: Option<&Path>,
    warehouses: &[String],
) -> Result<(), CliError> {
    let draft: OrderDraft = read_draft(path).await?;
    let errors = match original {
        Some(original) => {
            let original = read_draft::<OrderDraft>(original).await?;
            match original.submit(warehouses, |order| order) {
                Ok(original) => validate_order_edit(&draft, &original, warehouses),
                Err(errors) => {
                    warn!("Original order is itself invalid");
                    return report(&errors);
                }
            }
        }
        None => validate_order(&draft, warehouses),
    };
    report(&errors)
}

/// Validate a shipment draft against the selectable warehouses.
///
/// # Errors
///
/// Returns `CliError::Invalid` when the draft has field errors.
pub async fn shipment(path: &Path, warehouses: &[String]) -> Result<(), CliError> {
    let draft: ShipmentDraft = read_draft(path).await?;
    report(&validate_shipment(&draft, warehouses))
}

/// Validate a product draft.
///
/// # Errors
///
/// Returns `CliError::Invalid` when the draft has field errors.
pub async fn product(path: &Path) -> Result<(), CliError> {
    let draft: ProductDraft = read_draft(path).await?;
    report(&validate_product(&draft))
}

/// Validate a warehouse draft.
///
/// # Errors
///
/// Returns `CliError::Invalid` when the draft has field errors.
pub async fn warehouse(path: &Path) -> Result<(), CliError> {
    let draft: WarehouseDraft = read_draft(path).await?;
    report(&validate_warehouse(&draft))
}

/// Validate a user draft.
///
/// # Errors
///
/// Returns `CliError::Invalid` when the draft has field errors.
pub async fn user(path: &Path) -> Result<(), CliError> {
    let draft: UserDraft = read_draft(path).await?;
    report(&validate_user(&draft))
}

/// Read a draft; YAML parsing also accepts JSON.
async fn read_draft<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CliError::ReadInput {
            path: path.to_path_buf(),
            source,
        })?;
    parse_draft(path, &content)
}

fn parse_draft<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T, CliError> {
    serde_yaml::from_str(content).map_err(|source| CliError::ParseInput {
        path: path.to_path_buf(),
        source,
    })
}

fn report(errors: &FieldErrors) -> Result<(), CliError> {
    if errors.is_empty() {
        info!("Valid");
        return Ok(());
    }
    for (field, message) in errors.iter() {
        warn!(field, "{message}");
    }
    Err(CliError::Invalid(errors.len()))
}
