//! Products, listings and product request bodies.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{ProductId, ProductStatus, UserId, format_amount};

/// A product listed on the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub uuid: Uuid,
    pub seller_id: UserId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub category: String,
    /// Image URLs in display order.
    #[serde(default)]
    pub images: Vec<String>,
    pub status: ProductStatus,
    #[serde(default)]
    pub views_count: i32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Active and in stock.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == ProductStatus::Active && self.stock_quantity > 0
    }

    /// First image, used as the card thumbnail.
    #[must_use]
    pub fn display_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Price formatted for display, e.g. `$19.99`.
    #[must_use]
    pub fn formatted_price(&self) -> String {
        format_amount(self.price)
    }
}

/// Paging information returned with product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u32,
    pub limit: u32,
}

/// `data` payload of the listing endpoints.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductPage {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Query filters for `GET products`.
///
/// Unset fields are omitted from the query string.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductFilter {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl ProductFilter {
    /// Filter listing one category, capped at `limit` results.
    #[must_use]
    pub fn category(category: impl Into<String>, limit: u32) -> Self {
        Self {
            category: Some(category.into()),
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Query pairs in the order the backend documents them.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(min) = self.min_price {
            pairs.push(("minPrice", min.to_string()));
        }
        if let Some(max) = self.max_price {
            pairs.push(("maxPrice", max.to_string()));
        }
        pairs
    }
}

/// Body of `POST products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub category: String,
    #[serde(default)]
    pub images: Vec<String>,
}

impl NewProduct {
    /// Build a product draft from form input.
    ///
    /// A blank or missing image URL yields no images.
    #[must_use]
    pub fn from_form(
        name: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
        stock_quantity: i32,
        category: impl Into<String>,
        image_url: Option<&str>,
    ) -> Self {
        let images = image_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(|url| vec![url.to_string()])
            .unwrap_or_default();

        Self {
            name: name.into(),
            description: description.into(),
            price,
            stock_quantity,
            category: category.into(),
            images,
        }
    }
}

/// Body of `PUT products/{uuid}`; only set fields are sent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_quantity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}
