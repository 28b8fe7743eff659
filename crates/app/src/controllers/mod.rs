//! One controller per screen.
//!
//! Each controller owns a state record published through a
//! [`tokio::sync::watch`] channel. Screens subscribe and re-render on change;
//! only the controller writes.

mod add_product;
mod auth;
mod cart;
mod my_products;
mod product_detail;
mod product_list;

pub use add_product::{AddProductController, AddProductState};
pub use auth::{AuthController, AuthState};
pub use cart::{CartController, CartState};
pub use my_products::{MyProductsController, MyProductsState};
pub use product_detail::{ProductDetailController, ProductDetailState};
pub use product_list::{ProductListController, ProductListState};
