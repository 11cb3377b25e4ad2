//! Outbound shipments.

use serde::{Deserialize, Serialize};

use super::{ShipmentId, ShipmentStatus};

/// A shipment that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ShipmentId>,
    pub tracking_number: String,
    /// Order the shipment fulfils.
    pub order_number: String,
    pub carrier: String,
    /// Name of the warehouse the goods leave from.
    pub warehouse: String,
    pub destination: String,
    pub status: ShipmentStatus,
    pub ship_date: String,
}

/// Raw input from the shipment form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShipmentDraft {
    pub id: Option<ShipmentId>,
    pub tracking_number: String,
    pub order_number: String,
    pub carrier: String,
    pub warehouse: String,
    pub destination: String,
    pub status: Option<ShipmentStatus>,
    pub ship_date: String,
}
