//! Depot Core - shared types and form validators.
//!
//! This crate provides the types used across all Depot components:
//! - `admin` - Session management and API access for the back office
//! - `cli` - Command-line front end for login, validation and imports
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! storage, no HTTP clients. This keeps it lightweight and lets every screen
//! validate drafts without touching the network.
//!
//! # Modules
//!
//! - [`types`] - IDs, emails, statuses, and entity records/drafts
//! - [`validation`] - Field-level validators and submission gating

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod validation;

pub use types::*;
pub use validation::{
    FieldErrors, validate_order, validate_order_edit, validate_product, validate_shipment,
    validate_user, validate_warehouse,
};
