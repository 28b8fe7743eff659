//! Product catalogue and seller product management.

use serde::de::IgnoredAny;
use shopfront_core::{Envelope, NewProduct, Product, ProductFilter, ProductPage, ProductUpdate};
use uuid::Uuid;

use crate::error::ApiError;
use crate::gateway::Gateway;

#[derive(Debug, Clone)]
pub struct ProductRepository {
    gateway: Gateway,
}

impl ProductRepository {
    #[must_use]
    pub const fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Every product, unfiltered.
    ///
    /// # Errors
    ///
    /// Propagates the gateway error unchanged.
    pub async fn list_all(&self) -> Result<Envelope<ProductPage>, ApiError> {
        self.gateway.list_products(&ProductFilter::default()).await
    }

    /// Products in `category`, at most `limit` of them.
    ///
    /// # Errors
    ///
    /// Propagates the gateway error unchanged.
    pub async fn by_category(
        &self,
        category: &str,
        limit: u32,
    ) -> Result<Envelope<ProductPage>, ApiError> {
        self.gateway
            .list_products(&ProductFilter::category(category, limit))
            .await
    }

    /// # Errors
    ///
    /// Propagates the gateway error unchanged.
    pub async fn search(&self, query: &str) -> Result<Envelope<ProductPage>, ApiError> {
        self.gateway.search_products(query, None, None).await
    }

    /// # Errors
    ///
    /// Propagates the gateway error unchanged.
    pub async fn get(&self, uuid: Uuid) -> Result<Envelope<Product>, ApiError> {
        self.gateway.get_product(uuid).await
    }

    /// Products owned by the signed-in seller.
    ///
    /// # Errors
    ///
    /// Propagates the gateway error unchanged.
    pub async fn mine(&self) -> Result<Envelope<ProductPage>, ApiError> {
        self.gateway.my_products().await
    }

    /// # Errors
    ///
    /// Propagates the gateway error unchanged.
    pub async fn create(&self, product: &NewProduct) -> Result<Envelope<Product>, ApiError> {
        self.gateway.create_product(product).await
    }

    /// # Errors
    ///
    /// Propagates the gateway error unchanged.
    pub async fn update(
        &self,
        uuid: Uuid,
        update: &ProductUpdate,
    ) -> Result<Envelope<Product>, ApiError> {
        self.gateway.update_product(uuid, update).await
    }

    /// # Errors
    ///
    /// Propagates the gateway error unchanged.
    pub async fn delete(&self, uuid: Uuid) -> Result<Envelope<IgnoredAny>, ApiError> {
        self.gateway.delete_product(uuid).await
    }
}
