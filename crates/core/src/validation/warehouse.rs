//! Warehouse form validation.

use super::{FieldErrors, require_positive, require_text};
use crate::types::{Warehouse, WarehouseDraft};

/// Wire names of the warehouse form fields.
pub mod fields {
    pub const NAME: &str = "name";
    pub const LOCATION: &str = "location";
    pub const CAPACITY: &str = "capacity";
}

/// Validate a warehouse draft.
#[must_use]
pub fn validate_warehouse(draft: &WarehouseDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    require_text(&mut errors, fields::NAME, &draft.name, "Name is required");
    require_text(
        &mut errors,
        fields::LOCATION,
        &draft.location,
        "Location is required",
    );
    require_positive(
        &mut errors,
        fields::CAPACITY,
        draft.capacity,
        "Capacity must be greater than 0",
    );
    errors
}

impl WarehouseDraft {
    /// Validate and, if valid, hand the resulting [`Warehouse`] to `on_submit`.
    ///
    /// # Errors
    ///
    /// Returns the field errors without calling `on_submit` when the draft
    /// is invalid.
    pub fn submit<T>(&self, on_submit: impl FnOnce(Warehouse) -> T) -> Result<T, FieldErrors> {
        let errors = validate_warehouse(self);
        match u32::try_from(self.capacity) {
            Ok(capacity) if errors.is_empty() => Ok(on_submit(Warehouse {
                id: self.id,
                name: self.name.trim().to_owned(),
                location: self.location.trim().to_owned(),
                capacity,
            })),
            _ => Err(errors),
        }
    }
}
