//! Status and role enums.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a warehouse order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Every status, in workflow order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Processing,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Wire representation (`PENDING`, `PROCESSING`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Processing => "PROCESSING",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("invalid order status: {s}"))
    }
}

/// Delivery status of a shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipmentStatus {
    #[default]
    Pending,
    InTransit,
    Delivered,
    Returned,
}

impl ShipmentStatus {
    /// Every status, in delivery order.
    pub const ALL: [Self; 4] = [Self::Pending, Self::InTransit, Self::Delivered, Self::Returned];

    /// Wire representation (`PENDING`, `IN_TRANSIT`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InTransit => "IN_TRANSIT",
            Self::Delivered => "DELIVERED",
            Self::Returned => "RETURNED",
        }
    }
}

impl std::fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ShipmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("invalid shipment status: {s}"))
    }
}

/// Role of a back-office user.
///
/// The API owns the role list; names outside the known set decode to
/// [`UserRole::Other`] and keep their wire spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserRole {
    /// Full access including user management.
    Admin,
    /// Manages warehouses, orders and products.
    Manager,
    /// Day-to-day order and shipment handling.
    Employee,
    /// A role this client has no special handling for.
    Other(String),
}

impl UserRole {
    /// Wire name of the role.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "ADMIN",
            Self::Manager => "MANAGER",
            Self::Employee => "EMPLOYEE",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for UserRole {
    fn from(name: String) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Self::Admin,
            "MANAGER" => Self::Manager,
            "EMPLOYEE" => Self::Employee,
            _ => Self::Other(name.trim().to_owned()),
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Other(name) => name,
            known => known.as_str().to_owned(),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Processing).unwrap(),
            "\"PROCESSING\""
        );
        let parsed: OrderStatus = serde_json::from_str("\"CANCELLED\"").unwrap();
        assert_eq!(parsed, OrderStatus::Cancelled);
    }

    #[test]
    fn test_order_status_from_str_is_case_insensitive() {
        assert_eq!("completed".parse::<OrderStatus>(), Ok(OrderStatus::Completed));
        assert!("SHIPPED".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_shipment_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&ShipmentStatus::InTransit).unwrap(),
            "\"IN_TRANSIT\""
        );
        assert_eq!("in_transit".parse::<ShipmentStatus>(), Ok(ShipmentStatus::InTransit));
    }

    #[test]
    fn test_user_role_round_trips_through_display() {
        for role in [UserRole::Admin, UserRole::Manager, UserRole::Employee] {
            assert_eq!(role.to_string().parse::<UserRole>(), Ok(role.clone()));
        }
        assert_eq!("manager".parse::<UserRole>(), Ok(UserRole::Manager));
    }

    #[test]
    fn test_unlisted_user_role_keeps_its_name() {
        let role: UserRole = serde_json::from_str("\"SUPERVISOR\"").unwrap();
        assert_eq!(role, UserRole::Other("SUPERVISOR".to_string()));
        assert_eq!(role.to_string(), "SUPERVISOR");
        assert_eq!(serde_json::to_string(&role).unwrap(), "\"SUPERVISOR\"");
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"ADMIN\"");
    }
}
