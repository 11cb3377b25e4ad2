//! Shipment form validation.

use super::{FieldErrors, is_blank, is_listed, require_text};
use crate::types::{Shipment, ShipmentDraft};

/// Wire names of the shipment form fields.
pub mod fields {
    pub const TRACKING_NUMBER: &str = "trackingNumber";
    pub const ORDER_NUMBER: &str = "orderNumber";
    pub const CARRIER: &str = "carrier";
    pub const WAREHOUSE: &str = "warehouse";
    pub const DESTINATION: &str = "destination";
    pub const STATUS: &str = "status";
    pub const SHIP_DATE: &str = "shipDate";
}

/// Validate a shipment draft against the warehouses goods may leave from.
#[must_use]
pub fn validate_shipment<S: AsRef<str>>(draft: &ShipmentDraft, warehouses: &[S]) -> FieldErrors {
    let mut errors = FieldErrors::new();

    require_text(
        &mut errors,
        fields::TRACKING_NUMBER,
        &draft.tracking_number,
        "Tracking number is required",
    );
    require_text(
        &mut errors,
        fields::ORDER_NUMBER,
        &draft.order_number,
        "Order number is required",
    );
    require_text(&mut errors, fields::CARRIER, &draft.carrier, "Carrier is required");

    if is_blank(&draft.warehouse) {
        errors.insert(fields::WAREHOUSE, "Warehouse is required");
    } else if !is_listed(&draft.warehouse, warehouses) {
        errors.insert(fields::WAREHOUSE, "Select a warehouse from the list");
    }

    require_text(
        &mut errors,
        fields::DESTINATION,
        &draft.destination,
        "Destination is required",
    );
    if draft.status.is_none() {
        errors.insert(fields::STATUS, "Status is required");
    }
    require_text(
        &mut errors,
        fields::SHIP_DATE,
        &draft.ship_date,
        "Ship date is required",
    );

    errors
}

impl ShipmentDraft {
    /// Validate and, if valid, hand the resulting [`Shipment`] to `on_submit`.
    ///
    /// # Errors
    ///
    /// Returns the field errors without calling `on_submit` when the draft
    /// is invalid.
    pub fn submit<S, T, F>(&self, warehouses: &[S], on_submit: F) -> Result<T, FieldErrors>
    where
        S: AsRef<str>,
        F: FnOnce(Shipment) -> T,
    {
        let errors = validate_shipment(self, warehouses);
        match self.status {
            Some(status) if errors.is_empty() => Ok(on_submit(Shipment {
                id: self.id,
                tracking_number: self.tracking_number.trim().to_owned(),
                order_number: self.order_number.trim().to_owned(),
                carrier: self.carrier.trim().to_owned(),
                warehouse: self.warehouse.trim().to_owned(),
                destination: self.destination.trim().to_owned(),
                status,
                ship_date: self.ship_date.trim().to_owned(),
            })),
            _ => Err(errors),
        }
    }
}
