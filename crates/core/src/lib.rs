//! Shopfront Core - Shared domain types.
//!
//! This crate provides the types exchanged with the storefront REST backend
//! and shared by every other Shopfront component:
//! - `shopfront-client` - HTTP gateway, session holder and repositories
//! - `shopfront-app` - Screen controllers that keep view state in sync
//! - `shopfront-cli` - Command-line driver
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no HTTP
//! clients, no timers. This keeps it lightweight and usable anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, statuses and roles
//! - [`models`] - Backend entities, the response envelope and request bodies
//! - [`plans`] - The static subscription plan catalogue

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod models;
pub mod plans;
pub mod types;

pub use models::*;
pub use types::*;
