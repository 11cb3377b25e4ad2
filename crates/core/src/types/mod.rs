//! Core types for Depot.
//!
//! Type-safe IDs, email addresses, statuses, and the records behind the
//! user, warehouse, order, shipment and product screens.

pub mod email;
pub mod id;
pub mod order;
pub mod product;
pub mod shipment;
pub mod status;
pub mod user;
pub mod warehouse;

pub use email::{Email, EmailError};
pub use id::*;
pub use order::{Order, OrderDraft};
pub use product::{Product, ProductDraft};
pub use shipment::{Shipment, ShipmentDraft};
pub use status::*;
pub use user::{NewUser, UserDraft, UserProfile};
pub use warehouse::{Warehouse, WarehouseDraft};
