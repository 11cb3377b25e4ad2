//! Order form validation.

use super::{FieldErrors, is_blank, is_listed, require_positive, require_text};
use crate::types::{Order, OrderDraft};

/// Wire names of the order form fields.
pub mod fields {
    pub const ORDER_NUMBER: &str = "orderNumber";
    pub const CUSTOMER_NAME: &str = "customerName";
    pub const PRODUCT: &str = "product";
    pub const QUANTITY: &str = "quantity";
    pub const WAREHOUSE: &str = "warehouse";
    pub const STATUS: &str = "status";
    pub const DATE: &str = "date";
}

/// Validate an order draft against the warehouses the user may pick from.
#[must_use]
pub fn validate_order<S: AsRef<str>>(draft: &OrderDraft, warehouses: &[S]) -> FieldErrors {
    let mut errors = FieldErrors::new();

    require_text(
        &mut errors,
        fields::ORDER_NUMBER,
        &draft.order_number,
        "Order number is required",
    );
    require_text(
        &mut errors,
        fields::CUSTOMER_NAME,
        &draft.customer_name,
        "Customer name is required",
    );
    require_text(&mut errors, fields::PRODUCT, &draft.product, "Product is required");
    require_positive(
        &mut errors,
        fields::QUANTITY,
        draft.quantity,
        "Quantity must be greater than 0",
    );

    if is_blank(&draft.warehouse) {
        errors.insert(fields::WAREHOUSE, "Warehouse is required");
    } else if !is_listed(&draft.warehouse, warehouses) {
        errors.insert(fields::WAREHOUSE, "Select a warehouse from the list");
    }

    if draft.status.is_none() {
        errors.insert(fields::STATUS, "Status is required");
    }
    require_text(&mut errors, fields::DATE, &draft.date, "Date is required");

    errors
}

/// Validate an edit of an existing order.
///
/// Same rules as [`validate_order`], plus the order number must match the
/// original's.
#[must_use]
pub fn validate_order_edit<S: AsRef<str>>(
    draft: &OrderDraft,
    original: &Order,
    warehouses: &[S],
) -> FieldErrors {
    let mut errors = validate_order(draft, warehouses);
    if draft.order_number.trim() != original.order_number {
        errors.insert(fields::ORDER_NUMBER, "Order number cannot be changed");
    }
    errors
}

impl OrderDraft {
    /// Validate and, if valid, hand the resulting [`Order`] to `on_submit`.
    ///
    /// # Errors
    ///
    /// Returns the field errors without calling `on_submit` when the draft
    /// is invalid.
    pub fn submit<S, T, F>(&self, warehouses: &[S], on_submit: F) -> Result<T, FieldErrors>
    where
        S: AsRef<str>,
        F: FnOnce(Order) -> T,
    {
        let errors = validate_order(self, warehouses);
        self.build(errors).map(on_submit)
    }

    /// Like [`OrderDraft::submit`] for an edit of `original`.
    ///
    /// # Errors
    ///
    /// Returns the field errors without calling `on_submit` when the draft
    /// is invalid or changes the order number.
    pub fn submit_edit<S, T, F>(
        &self,
        original: &Order,
        warehouses: &[S],
        on_submit: F,
    ) -> Result<T, FieldErrors>
    where
        S: AsRef<str>,
        F: FnOnce(Order) -> T,
    {
        let errors = validate_order_edit(self, original, warehouses);
        self.build(errors).map(|order| {
            on_submit(Order {
                id: original.id.or(order.id),
                ..order
            })
        })
    }

    fn build(&self, errors: FieldErrors) -> Result<Order, FieldErrors> {
        match (self.status, u32::try_from(self.quantity)) {
            (Some(status), Ok(quantity)) if errors.is_empty() => Ok(Order {
                id: self.id,
                order_number: self.order_number.trim().to_owned(),
                customer_name: self.customer_name.trim().to_owned(),
                product: self.product.trim().to_owned(),
                quantity,
                warehouse: self.warehouse.trim().to_owned(),
                status,
                date: self.date.trim().to_owned(),
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{OrderId, OrderStatus};

    const WAREHOUSES: [&str; 2] = ["Casablanca North", "Rabat Port"];

    fn filled() -> OrderDraft {
        OrderDraft {
            id: None,
            order_number: "ORD-1001".to_string(),
            customer_name: "Atlas Foods".to_string(),
            product: "Olive oil 5L".to_string(),
            quantity: 5,
            warehouse: "Rabat Port".to_string(),
            status: Some(OrderStatus::Pending),
            date: "2024-03-01".to_string(),
        }
    }

    #[test]
    fn test_filled_order_is_valid() {
        assert!(validate_order(&filled(), &WAREHOUSES).is_empty());
    }

    #[test]
    fn test_zero_quantity() {
        let draft = OrderDraft {
            quantity: 0,
            ..filled()
        };
        let errors = validate_order(&draft, &WAREHOUSES);
        assert_eq!(
            errors.get(fields::QUANTITY),
            Some("Quantity must be greater than 0")
        );
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_negative_quantity() {
        let draft = OrderDraft {
            quantity: -3,
            ..filled()
        };
        assert!(validate_order(&draft, &WAREHOUSES).contains(fields::QUANTITY));
    }

    #[test]
    fn test_empty_draft_reports_every_field() {
        let errors = validate_order(&OrderDraft::default(), &WAREHOUSES);
        for field in [
            fields::ORDER_NUMBER,
            fields::CUSTOMER_NAME,
            fields::PRODUCT,
            fields::QUANTITY,
            fields::WAREHOUSE,
            fields::STATUS,
            fields::DATE,
        ] {
            assert!(errors.contains(field), "missing error for {field}");
        }
    }

    #[test]
    fn test_whitespace_only_is_blank() {
        let draft = OrderDraft {
            customer_name: " \t ".to_string(),
            ..filled()
        };
        assert_eq!(
            validate_order(&draft, &WAREHOUSES).get(fields::CUSTOMER_NAME),
            Some("Customer name is required")
        );
    }

    #[test]
    fn test_warehouse_must_be_listed() {
        let draft = OrderDraft {
            warehouse: "Tangier Med".to_string(),
            ..filled()
        };
        assert_eq!(
            validate_order(&draft, &WAREHOUSES).get(fields::WAREHOUSE),
            Some("Select a warehouse from the list")
        );

        let draft = OrderDraft {
            warehouse: String::new(),
            ..filled()
        };
        assert_eq!(
            validate_order(&draft, &WAREHOUSES).get(fields::WAREHOUSE),
            Some("Warehouse is required")
        );
    }

    #[test]
    fn test_warehouse_with_no_options() {
        let none: [&str; 0] = [];
        assert!(validate_order(&filled(), &none).contains(fields::WAREHOUSE));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let draft = OrderDraft {
            quantity: 0,
            date: String::new(),
            ..filled()
        };
        assert_eq!(
            validate_order(&draft, &WAREHOUSES),
            validate_order(&draft, &WAREHOUSES)
        );
    }

    #[test]
    fn test_submit_calls_handler_with_trimmed_order() {
        let draft = OrderDraft {
            order_number: "  ORD-1001 ".to_string(),
            ..filled()
        };
        let order = draft.submit(&WAREHOUSES, |order| order).unwrap();
        assert_eq!(order.order_number, "ORD-1001");
        assert_eq!(order.quantity, 5);
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_submit_skips_handler_when_invalid() {
        let draft = OrderDraft {
            quantity: 0,
            ..filled()
        };
        let mut called = false;
        let result = draft.submit(&WAREHOUSES, |_| called = true);
        assert!(result.is_err());
        assert!(!called);
    }

    #[test]
    fn test_edit_cannot_change_order_number() {
        let original = filled().submit(&WAREHOUSES, |o| o).unwrap();
        let draft = OrderDraft {
            order_number: "ORD-2002".to_string(),
            ..OrderDraft::from(&original)
        };
        assert_eq!(
            validate_order_edit(&draft, &original, &WAREHOUSES).get(fields::ORDER_NUMBER),
            Some("Order number cannot be changed")
        );
    }

    #[test]
    fn test_submit_edit_keeps_original_id() {
        let original = Order {
            id: Some(OrderId::new(9)),
            ..filled().submit(&WAREHOUSES, |o| o).unwrap()
        };
        let draft = OrderDraft {
            id: None,
            status: Some(OrderStatus::Completed),
            ..OrderDraft::from(&original)
        };
        let updated = draft.submit_edit(&original, &WAREHOUSES, |o| o).unwrap();
        assert_eq!(updated.id, Some(OrderId::new(9)));
        assert_eq!(updated.status, OrderStatus::Completed);
    }
}
