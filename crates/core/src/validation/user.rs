//! User form validation.

use super::{FieldErrors, optional_text, require_text};
use crate::types::{Email, EmailError, NewUser, UserDraft};

/// Wire names of the user form fields.
pub mod fields {
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const ROLE: &str = "role";
}

/// Validate a user draft.
///
/// Phone, address and CIN are optional free text.
#[must_use]
pub fn validate_user(draft: &UserDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    require_text(&mut errors, fields::NAME, &draft.name, "Name is required");

    match Email::parse(&draft.email) {
        Ok(_) => {}
        Err(EmailError::Empty) => errors.insert(fields::EMAIL, "Email is required"),
        Err(_) => errors.insert(fields::EMAIL, "Enter a valid email address"),
    }

    if draft
        .role
        .as_ref()
        .is_none_or(|role| role.as_str().trim().is_empty())
    {
        errors.insert(fields::ROLE, "Role is required");
    }
    errors
}

impl UserDraft {
    /// Validate and, if valid, hand the resulting [`NewUser`] to `on_submit`.
    ///
    /// # Errors
    ///
    /// Returns the field errors without calling `on_submit` when the draft
    /// is invalid.
    pub fn submit<T>(&self, on_submit: impl FnOnce(NewUser) -> T) -> Result<T, FieldErrors> {
        let errors = validate_user(self);
        match (Email::parse(&self.email), &self.role) {
            (Ok(email), Some(role)) if errors.is_empty() => Ok(on_submit(NewUser {
                id: self.id,
                name: self.name.trim().to_owned(),
                email,
                phone: optional_text(&self.phone),
                address: optional_text(&self.address),
                cin: optional_text(&self.cin),
                role: role.clone(),
            })),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::UserRole;

    fn filled() -> UserDraft {
        UserDraft {
            name: "Salma Idrissi".to_string(),
            email: "salma@depot.example".to_string(),
            role: Some(UserRole::Manager),
            ..UserDraft::default()
        }
    }

    #[test]
    fn test_filled_user_is_valid() {
        assert!(validate_user(&filled()).is_empty());
    }

    #[test]
    fn test_email_messages() {
        let draft = UserDraft {
            email: String::new(),
            ..filled()
        };
        assert_eq!(
            validate_user(&draft).get(fields::EMAIL),
            Some("Email is required")
        );

        let draft = UserDraft {
            email: "salma.depot.example".to_string(),
            ..filled()
        };
        assert_eq!(
            validate_user(&draft).get(fields::EMAIL),
            Some("Enter a valid email address")
        );
    }

    #[test]
    fn test_role_required() {
        let draft = UserDraft {
            role: None,
            ..filled()
        };
        assert!(validate_user(&draft).contains(fields::ROLE));

        let blank = UserDraft {
            role: Some(UserRole::Other("  ".to_string())),
            ..filled()
        };
        assert_eq!(validate_user(&blank).get(fields::ROLE), Some("Role is required"));
    }

    #[test]
    fn test_unlisted_role_is_accepted() {
        let draft = UserDraft {
            role: Some(UserRole::Other("SUPERVISOR".to_string())),
            ..filled()
        };
        let user = draft.submit(|user| user).unwrap();
        assert_eq!(user.role.as_str(), "SUPERVISOR");
    }

    #[test]
    fn test_submit_normalises_optional_fields() {
        let draft = UserDraft {
            phone: "  ".to_string(),
            cin: " AB123456 ".to_string(),
            ..filled()
        };
        let user = draft.submit(|u| u).unwrap();
        assert_eq!(user.phone, None);
        assert_eq!(user.cin.as_deref(), Some("AB123456"));
        assert_eq!(user.email.as_str(), "salma@depot.example");
    }
}
