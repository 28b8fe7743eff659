//! Shopfront Client - Access to the storefront REST backend.
//!
//! # Architecture
//!
//! - [`Gateway`] issues one HTTP request per backend endpoint and returns the
//!   decoded [`Envelope`](shopfront_core::Envelope) or an [`ApiError`]. It
//!   never retries and never swallows a failure.
//! - [`SessionStore`] holds the bearer token and signed-in user. The gateway
//!   reads it on every request; only login, register and logout write it.
//! - [`repositories`] map one caller intent to exactly one gateway call.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_client::{ClientConfig, Gateway, SessionStore};
//! use shopfront_client::repositories::ProductRepository;
//!
//! let session = SessionStore::new();
//! let gateway = Gateway::new(&ClientConfig::from_env()?, session.clone())?;
//! let products = ProductRepository::new(gateway.clone());
//!
//! let page = products.list_all().await?.into_result()?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod gateway;
pub mod repositories;
pub mod session;

pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, EnvelopeExt};
pub use gateway::Gateway;
pub use session::{Session, SessionStore};
