//! Form validators.
//!
//! Each validator maps a draft to a [`FieldErrors`] set keyed by the field's
//! wire name. An empty set means the draft may be submitted. Validators have
//! no side effects: screens keep their own error state and call
//! [`FieldErrors::refresh_field`] after each edit to drop stale messages.
//!
//! Drafts also expose a `submit` method that only calls the supplied handler
//! when validation passes:
//!
//! ```
//! use depot_core::{OrderDraft, OrderStatus};
//!
//! let warehouses = ["Casablanca North", "Rabat Port"];
//! let draft = OrderDraft {
//!     order_number: "ORD-1001".into(),
//!     customer_name: "Atlas Foods".into(),
//!     product: "Olive oil 5L".into(),
//!     quantity: 5,
//!     warehouse: "Rabat Port".into(),
//!     status: Some(OrderStatus::Pending),
//!     date: "2024-03-01".into(),
//!     ..OrderDraft::default()
//! };
//!
//! let number = draft.submit(&warehouses, |order| order.order_number).unwrap();
//! assert_eq!(number, "ORD-1001");
//! ```

pub mod order;
pub mod product;
pub mod shipment;
pub mod user;
pub mod warehouse;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use order::{validate_order, validate_order_edit};
pub use product::validate_product;
pub use shipment::validate_shipment;
pub use user::validate_user;
pub use warehouse::validate_warehouse;

/// Field-level validation messages, ordered by field name.
///
/// Only the first message for a field is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// An empty error set.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// `true` when no field failed validation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with an error.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Whether `field` failed.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Record a message for `field` unless it already has one.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    /// Iterate over `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Replace this set's entry for `field` with the one in `fresh`.
    ///
    /// `fresh` is the result of re-validating the whole draft after `field`
    /// was edited. Errors on other fields are left untouched, so messages
    /// only appear on fields the user has already interacted with.
    pub fn refresh_field(&mut self, field: &str, fresh: &Self) {
        match fresh.0.get(field) {
            Some(message) => {
                self.0.insert(field.to_owned(), message.clone());
            }
            None => {
                self.0.remove(field);
            }
        }
    }

    /// Drop every message.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// `Ok(value)` when empty, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns the error set itself when any field failed.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// `true` for empty and whitespace-only input.
fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn require_text(errors: &mut FieldErrors, field: &str, value: &str, message: &str) {
    if is_blank(value) {
        errors.insert(field, message);
    }
}

fn require_positive(errors: &mut FieldErrors, field: &str, value: i64, message: &str) {
    if value <= 0 {
        errors.insert(field, message);
    } else if u32::try_from(value).is_err() {
        errors.insert(field, format!("{message} and at most {}", u32::MAX));
    }
}

/// Whether `value` names one of `options`, ignoring surrounding whitespace.
fn is_listed<S: AsRef<str>>(value: &str, options: &[S]) -> bool {
    let value = value.trim();
    options.iter().any(|option| option.as_ref().trim() == value)
}

/// Trimmed copy of optional free text; blank becomes `None`.
fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
