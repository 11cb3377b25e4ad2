//! Product form validation.

use super::{FieldErrors, require_text};
use crate::types::{Product, ProductDraft};

/// Wire names of the product form fields.
pub mod fields {
    pub const NAME: &str = "name";
    pub const DESCRIPTION: &str = "description";
}

/// Validate a product draft.
#[must_use]
pub fn validate_product(draft: &ProductDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    require_text(&mut errors, fields::NAME, &draft.name, "Name is required");
    require_text(
        &mut errors,
        fields::DESCRIPTION,
        &draft.description,
        "Description is required",
    );
    errors
}

impl ProductDraft {
    /// Validate and, if valid, hand the resulting [`Product`] to `on_submit`.
    ///
    /// # Errors
    ///
    /// Returns the field errors without calling `on_submit` when the draft
    /// is invalid.
    pub fn submit<T>(&self, on_submit: impl FnOnce(Product) -> T) -> Result<T, FieldErrors> {
        let product = Product {
            id: self.id,
            name: self.name.trim().to_owned(),
            description: self.description.trim().to_owned(),
        };
        validate_product(self).into_result(product).map(on_submit)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_product_has_two_errors() {
        let errors = validate_product(&ProductDraft::default());
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(fields::NAME), Some("Name is required"));
        assert_eq!(
            errors.get(fields::DESCRIPTION),
            Some("Description is required")
        );
    }

    #[test]
    fn test_whitespace_name_is_rejected() {
        let draft = ProductDraft {
            name: "   ".to_string(),
            description: "Cold-pressed, 5 litre tin".to_string(),
            ..ProductDraft::default()
        };
        let errors = validate_product(&draft);
        assert!(errors.contains(fields::NAME));
        assert!(!errors.contains(fields::DESCRIPTION));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let draft = ProductDraft {
            name: "Olive oil".to_string(),
            ..ProductDraft::default()
        };
        assert_eq!(validate_product(&draft), validate_product(&draft));
    }

    #[test]
    fn test_submit() {
        let draft = ProductDraft {
            name: " Olive oil ".to_string(),
            description: "Cold-pressed".to_string(),
            ..ProductDraft::default()
        };
        let product = draft.submit(|p| p).unwrap();
        assert_eq!(product.name, "Olive oil");

        let errors = ProductDraft::default().submit(|p| p).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
