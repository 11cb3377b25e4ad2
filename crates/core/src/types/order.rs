//! Warehouse orders.

use serde::{Deserialize, Serialize};

use super::{OrderId, OrderStatus};

/// An order that passed validation.
///
/// `order_number` is the order's identity and does not change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderId>,
    pub order_number: String,
    pub customer_name: String,
    pub product: String,
    pub quantity: u32,
    /// Name of the warehouse fulfilling the order.
    pub warehouse: String,
    pub status: OrderStatus,
    pub date: String,
}

/// Raw input from the order form.
///
/// Every field defaults so partially filled forms deserialize; the
/// validator reports what is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderDraft {
    pub id: Option<OrderId>,
    pub order_number: String,
    pub customer_name: String,
    pub product: String,
    pub quantity: i64,
    pub warehouse: String,
    pub status: Option<OrderStatus>,
    pub date: String,
}

impl From<&Order> for OrderDraft {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            order_number: order.order_number.clone(),
            customer_name: order.customer_name.clone(),
            product: order.product.clone(),
            quantity: i64::from(order.quantity),
            warehouse: order.warehouse.clone(),
            status: Some(order.status),
            date: order.date.clone(),
        }
    }
}
