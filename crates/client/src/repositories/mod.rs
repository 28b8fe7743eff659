//! Entity repositories.
//!
//! Each repository maps one caller intent to exactly one [`Gateway`] call and
//! adds only request shaping (default role, related-product filter). They
//! hold no state and never cache.
//!
//! [`Gateway`]: crate::Gateway

mod auth;
mod cart;
mod product;

pub use auth::AuthRepository;
pub use cart::CartRepository;
pub use product::ProductRepository;
