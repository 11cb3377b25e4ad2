//! Warehouses.

use serde::{Deserialize, Serialize};

use super::WarehouseId;

/// A warehouse that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<WarehouseId>,
    pub name: String,
    pub location: String,
    /// Storage capacity in pallet positions.
    pub capacity: u32,
}

/// Raw input from the warehouse form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WarehouseDraft {
    pub id: Option<WarehouseId>,
    pub name: String,
    pub location: String,
    pub capacity: i64,
}
