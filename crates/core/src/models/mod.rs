//! Backend entities and wire formats.
//!
//! Field names follow the backend's camelCase JSON; Rust names are
//! snake_case and mapped with `#[serde(rename_all = "camelCase")]`.

pub mod cart;
pub mod envelope;
pub mod product;
pub mod user;

pub use cart::{Cart, CartItem, CartSummary};
pub use envelope::{Envelope, SUCCESS_STATUS};
pub use product::{NewProduct, Pagination, Product, ProductFilter, ProductPage, ProductUpdate};
pub use user::{AuthData, NewAccount, User};
