//! Shopping cart snapshots.
//!
//! Every total in here is computed by the backend. The client replaces a
//! whole [`Cart`] with the latest server copy and never adjusts quantities or
//! amounts locally.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::product::Product;
use crate::types::{CartId, CartItemId, CartStatus, ProductId, UserId, format_amount};

/// A user's cart as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: CartId,
    pub uuid: Uuid,
    pub user_id: UserId,
    pub status: CartStatus,
    pub total_items: i32,
    pub total_amount: Decimal,
    pub currency: String,
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Cart {
    /// No items in the cart.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_items == 0 || self.items.is_empty()
    }

    /// Total formatted for display.
    #[must_use]
    pub fn formatted_total(&self) -> String {
        format_amount(self.total_amount)
    }

    /// Find the line holding `product_id`.
    #[must_use]
    pub fn item_for_product(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }
}

/// One line of a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: CartItemId,
    pub uuid: Uuid,
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    /// Product snapshot, when the backend expands it.
    #[serde(default)]
    pub product: Option<Product>,
    #[serde(default)]
    pub added_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CartItem {
    #[must_use]
    pub fn formatted_unit_price(&self) -> String {
        format_amount(self.unit_price)
    }

    #[must_use]
    pub fn formatted_total_price(&self) -> String {
        format_amount(self.total_price)
    }
}

/// `data` payload of `GET cart/count`, used for the cart badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub count: i32,
    pub total_amount: Decimal,
}
