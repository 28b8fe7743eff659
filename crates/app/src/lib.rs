//! Shopfront App - Screen state for the storefront client.
//!
//! # Architecture
//!
//! - [`AppState`] owns the session and gateway and builds one controller per
//!   screen.
//! - [`controllers`] publish their state through `tokio::sync::watch`. The
//!   explicit operations are `async` and return once the state has settled.
//! - [`Debouncer`] and [`Ticker`] drive search-as-you-type and the silent
//!   background refresh. Both stop when their controller is dropped.
//! - [`reconcile`] decides whether refreshed data differs from what is shown.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_app::{AppState, SyncConfig};
//! use shopfront_client::ClientConfig;
//!
//! let app = AppState::new(&ClientConfig::from_env()?, SyncConfig::from_env()?)?;
//! let catalogue = app.product_list();
//! catalogue.load_products().await;
//! let mut changes = catalogue.subscribe();
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod controllers;
pub mod debounce;
pub mod messages;
pub mod reconcile;
pub mod state;
pub mod tasks;
pub mod ticker;

pub use config::SyncConfig;
pub use debounce::Debouncer;
pub use state::AppState;
pub use tasks::TaskScope;
pub use ticker::Ticker;
