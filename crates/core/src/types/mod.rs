//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod role;
pub mod status;

pub use id::*;
pub use price::{CurrencyCode, Price, format_amount};
pub use role::{DEFAULT_ROLE, PRODUCT_MANAGER_ROLES, Role};
pub use status::*;
