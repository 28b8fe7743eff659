//! Cart reads and mutations.
//!
//! Every mutation answers with the full cart as the backend now sees it.

use shopfront_core::{Cart, CartItem, CartItemId, CartSummary, Envelope, ProductId};

use crate::error::ApiError;
use crate::gateway::Gateway;

#[derive(Debug, Clone)]
pub struct CartRepository {
    gateway: Gateway,
}

impl CartRepository {
    #[must_use]
    pub const fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// # Errors
    ///
    /// Propagates the gateway error unchanged.
    pub async fn get(&self) -> Result<Envelope<Cart>, ApiError> {
        self.gateway.get_cart().await
    }

    /// Badge count and total only.
    ///
    /// # Errors
    ///
    /// Propagates the gateway error unchanged.
    pub async fn count(&self) -> Result<Envelope<CartSummary>, ApiError> {
        self.gateway.cart_count().await
    }

    /// # Errors
    ///
    /// Propagates the gateway error unchanged.
    pub async fn add(&self, product_id: ProductId, quantity: i32) -> Result<Envelope<Cart>, ApiError> {
        self.gateway.add_cart_item(product_id, quantity).await
    }

    /// Set the quantity of a line. Callers route non-positive quantities to
    /// [`CartRepository::remove`].
    ///
    /// # Errors
    ///
    /// Propagates the gateway error unchanged.
    pub async fn update_quantity(
        &self,
        item_id: CartItemId,
        quantity: i32,
    ) -> Result<Envelope<Cart>, ApiError> {
        self.gateway.update_cart_item(item_id, quantity).await
    }

    /// # Errors
    ///
    /// Propagates the gateway error unchanged.
    pub async fn remove(&self, item_id: CartItemId) -> Result<Envelope<Cart>, ApiError> {
        self.gateway.remove_cart_item(item_id).await
    }

    /// # Errors
    ///
    /// Propagates the gateway error unchanged.
    pub async fn clear(&self) -> Result<Envelope<Cart>, ApiError> {
        self.gateway.clear_cart().await
    }

    /// # Errors
    ///
    /// Propagates the gateway error unchanged.
    pub async fn save_for_later(&self, item_id: CartItemId) -> Result<Envelope<Cart>, ApiError> {
        self.gateway.save_for_later(item_id).await
    }

    /// # Errors
    ///
    /// Propagates the gateway error unchanged.
    pub async fn saved_items(&self) -> Result<Envelope<Vec<CartItem>>, ApiError> {
        self.gateway.saved_items().await
    }
}
