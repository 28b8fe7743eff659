//! Shopping cart screen.
//!
//! Every mutation replaces the whole cart with the copy the backend returns.
//! Counts and totals are never adjusted locally.

use std::future::Future;

use rust_decimal::Decimal;
use shopfront_client::repositories::CartRepository;
use shopfront_client::{ApiError, EnvelopeExt};
use shopfront_core::{Cart, CartItem, CartItemId, CartSummary, Envelope, ProductId};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::messages::{self, MessageTable};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CartState {
    pub is_loading: bool,
    pub cart: Option<Cart>,
    pub cart_count: i32,
    pub total_amount: Decimal,
    pub saved_items: Vec<CartItem>,
    pub error_message: Option<String>,
    pub action_in_progress: bool,
    pub success_message: Option<String>,
}

impl CartState {
    /// Replace the snapshot and the badge figures derived from it.
    fn apply(&mut self, cart: Option<Cart>) {
        self.cart_count = cart.as_ref().map_or(0, |cart| cart.total_items);
        self.total_amount = cart.as_ref().map_or(Decimal::ZERO, |cart| cart.total_amount);
        self.cart = cart;
    }
}

/// Controller behind the cart screen and the cart badge.
#[derive(Debug)]
pub struct CartController {
    cart: CartRepository,
    state: watch::Sender<CartState>,
}

impl CartController {
    #[must_use]
    pub fn new(cart: CartRepository) -> Self {
        let (state, _) = watch::channel(CartState::default());
        Self { cart, state }
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn state(&self) -> CartState {
        self.state.borrow().clone()
    }

    /// Load the full cart. A failed load empties the shown cart.
    #[instrument(skip(self))]
    pub async fn load_cart(&self) {
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error_message = None;
            state.success_message = None;
        });

        let result = self.cart.get().await.and_then(EnvelopeExt::into_result);

        self.state.send_modify(|state| {
            state.is_loading = false;
            match result {
                Ok(cart) => {
                    debug!(items = cart.as_ref().map_or(0, |c| c.total_items), "Cart loaded");
                    state.apply(cart);
                }
                Err(e) => {
                    warn!(error = %e, "Cart load failed");
                    state.apply(None);
                    state.error_message = Some(messages::LOAD_CART.describe(&e));
                }
            }
        });
    }

    /// Same as [`CartController::load_cart`].
    pub async fn refresh_cart(&self) {
        self.load_cart().await;
    }

    /// Refresh only the badge figures. Failures zero them silently.
    #[instrument(skip(self))]
    pub async fn load_cart_count(&self) {
        let summary = match self.cart.count().await.and_then(EnvelopeExt::into_result) {
            Ok(summary) => summary.unwrap_or_default(),
            Err(e) => {
                debug!(error = %e, "Cart count unavailable");
                CartSummary::default()
            }
        };
        self.state.send_if_modified(|state| {
            if state.cart_count == summary.count && state.total_amount == summary.total_amount {
                return false;
            }
            state.cart_count = summary.count;
            state.total_amount = summary.total_amount;
            true
        });
    }

    #[instrument(skip(self))]
    pub async fn add_to_cart(&self, product_id: ProductId, quantity: i32) {
        self.perform(
            &messages::CART_ADD,
            messages::CART_ITEM_ADDED,
            self.cart.add(product_id, quantity),
        )
        .await;
    }

    /// Set a line's quantity. Zero or less removes the line instead.
    #[instrument(skip(self))]
    pub async fn update_item_quantity(&self, item_id: CartItemId, quantity: i32) {
        if quantity <= 0 {
            debug!(%item_id, quantity, "Non-positive quantity, removing line");
            self.remove_item(item_id).await;
            return;
        }
        self.perform(
            &messages::CART_ACTION,
            messages::CART_ACTION_DONE,
            self.cart.update_quantity(item_id, quantity),
        )
        .await;
    }

    #[instrument(skip(self))]
    pub async fn remove_item(&self, item_id: CartItemId) {
        self.perform(
            &messages::CART_ACTION,
            messages::CART_ACTION_DONE,
            self.cart.remove(item_id),
        )
        .await;
    }

    #[instrument(skip(self))]
    pub async fn clear_cart(&self) {
        self.perform(
            &messages::CART_ACTION,
            messages::CART_ACTION_DONE,
            self.cart.clear(),
        )
        .await;
    }

    #[instrument(skip(self))]
    pub async fn save_for_later(&self, item_id: CartItemId) {
        self.perform(
            &messages::CART_ACTION,
            messages::CART_ACTION_DONE,
            self.cart.save_for_later(item_id),
        )
        .await;
    }

    /// Load the items saved for later.
    #[instrument(skip(self))]
    pub async fn load_saved_items(&self) {
        let result = self.cart.saved_items().await.and_then(EnvelopeExt::into_result);
        self.state.send_modify(|state| match result {
            Ok(items) => state.saved_items = items.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Saved items load failed");
                state.error_message = Some(messages::CART_ACTION.describe(&e));
            }
        });
    }

    /// Forget everything, e.g. after the user signs out.
    pub fn reset(&self) {
        self.state.send_replace(CartState::default());
    }

    /// Reset and load the cart of the user who just signed in.
    pub async fn initialize_for_new_user(&self) {
        self.reset();
        self.load_cart().await;
    }

    pub fn clear_messages(&self) {
        self.state.send_if_modified(|state| {
            let had = state.error_message.is_some() || state.success_message.is_some();
            state.error_message = None;
            state.success_message = None;
            had
        });
    }

    /// Shared mutation template.
    ///
    /// On success the server's cart replaces the shown one. On failure the
    /// shown cart stays as it was.
    async fn perform<F>(&self, table: &MessageTable, done: &str, call: F)
    where
        F: Future<Output = Result<Envelope<Cart>, ApiError>>,
    {
        self.state.send_modify(|state| {
            state.action_in_progress = true;
            state.error_message = None;
            state.success_message = None;
        });

        let result = call.await.and_then(EnvelopeExt::into_result);

        self.state.send_modify(|state| {
            state.action_in_progress = false;
            match result {
                Ok(cart) => {
                    state.apply(cart);
                    info!(count = state.cart_count, total = %state.total_amount, "Cart updated");
                    state.success_message = Some(done.to_string());
                }
                Err(e) => {
                    warn!(error = %e, "Cart action failed");
                    state.error_message = Some(table.describe(&e));
                }
            }
        });
    }
}
