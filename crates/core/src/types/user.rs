//! Back-office user records.

use serde::{Deserialize, Serialize};

use super::{Email, UserId, UserRole};

/// Profile of the signed-in user, as returned by the login endpoint
/// (`userDTO`) and cached alongside the access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub email: Email,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// National identity card number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cin: Option<String>,
    pub role: UserRole,
}

impl UserProfile {
    /// Whether the user may manage other users.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Raw input from the user create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserDraft {
    pub id: Option<UserId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub cin: String,
    pub role: Option<UserRole>,
}

/// A user record that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub id: Option<UserId>,
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub cin: Option<String>,
    pub role: UserRole,
}
