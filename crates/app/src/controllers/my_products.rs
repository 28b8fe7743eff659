//! Seller's own products: list, refresh, edit and delete.

use shopfront_client::EnvelopeExt;
use shopfront_client::repositories::ProductRepository;
use shopfront_core::{Product, ProductUpdate};
use tokio::sync::watch;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::messages;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MyProductsState {
    pub is_loading: bool,
    pub my_products: Vec<Product>,
    pub error_message: Option<String>,
    pub is_refreshing: bool,
    pub is_deleting: bool,
    pub delete_success: Option<String>,
    pub is_updating: bool,
    pub update_success: Option<String>,
}

#[derive(Debug)]
pub struct MyProductsController {
    products: ProductRepository,
    state: watch::Sender<MyProductsState>,
}

impl MyProductsController {
    #[must_use]
    pub fn new(products: ProductRepository) -> Self {
        let (state, _) = watch::channel(MyProductsState::default());
        Self { products, state }
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<MyProductsState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn state(&self) -> MyProductsState {
        self.state.borrow().clone()
    }

    #[instrument(skip(self))]
    pub async fn load_my_products(&self) {
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error_message = None;
            state.delete_success = None;
        });

        let result = self.products.mine().await.and_then(EnvelopeExt::into_result);

        self.state.send_modify(|state| {
            state.is_loading = false;
            match result {
                Ok(page) => {
                    state.my_products = page.map(|page| page.products).unwrap_or_default();
                    info!(count = state.my_products.len(), "Own products loaded");
                }
                Err(e) => {
                    warn!(error = %e, "Own products load failed");
                    state.error_message = Some(messages::LOAD_MY_PRODUCTS.describe(&e));
                }
            }
        });
    }

    /// Pull-to-refresh variant of [`MyProductsController::load_my_products`].
    #[instrument(skip(self))]
    pub async fn refresh_my_products(&self) {
        self.state.send_modify(|state| {
            state.is_refreshing = true;
            state.error_message = None;
            state.delete_success = None;
        });

        let result = self.products.mine().await.and_then(EnvelopeExt::into_result);

        self.state.send_modify(|state| {
            state.is_refreshing = false;
            match result {
                Ok(page) => state.my_products = page.map(|page| page.products).unwrap_or_default(),
                Err(e) => {
                    warn!(error = %e, "Own products refresh failed");
                    state.error_message = Some(messages::REFRESH_MY_PRODUCTS.describe(&e));
                }
            }
        });
    }

    /// Delete a product and drop it from the list on success.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, uuid: Uuid) {
        self.state.send_modify(|state| {
            state.is_deleting = true;
            state.error_message = None;
            state.delete_success = None;
        });

        let result = self.products.delete(uuid).await.and_then(EnvelopeExt::into_result);

        self.state.send_modify(|state| {
            state.is_deleting = false;
            match result {
                Ok(_) => {
                    state.my_products.retain(|product| product.uuid != uuid);
                    state.delete_success = Some(messages::PRODUCT_DELETED.to_string());
                    info!(%uuid, "Product deleted");
                }
                Err(e) => {
                    warn!(%uuid, error = %e, "Product delete failed");
                    state.error_message = Some(messages::DELETE_PRODUCT.describe(&e));
                }
            }
        });
    }

    /// Apply a partial update and show the server's copy of the product.
    #[instrument(skip(self, update))]
    pub async fn update_product(&self, uuid: Uuid, update: &ProductUpdate) {
        self.state.send_modify(|state| {
            state.is_updating = true;
            state.error_message = None;
            state.update_success = None;
        });

        let result = self
            .products
            .update(uuid, update)
            .await
            .and_then(EnvelopeExt::into_result);

        self.state.send_modify(|state| {
            state.is_updating = false;
            match result {
                Ok(updated) => {
                    if let Some(updated) = updated
                        && let Some(shown) = state.my_products.iter_mut().find(|p| p.uuid == uuid)
                    {
                        *shown = updated;
                    }
                    state.update_success = Some(messages::PRODUCT_UPDATED.to_string());
                    info!(%uuid, "Product updated");
                }
                Err(e) => {
                    warn!(%uuid, error = %e, "Product update failed");
                    state.error_message = Some(messages::UPDATE_PRODUCT.describe(&e));
                }
            }
        });
    }

    pub fn clear_error(&self) {
        self.state
            .send_if_modified(|state| state.error_message.take().is_some());
    }

    pub fn clear_delete_success(&self) {
        self.state
            .send_if_modified(|state| state.delete_success.take().is_some());
    }

    pub fn clear_update_success(&self) {
        self.state
            .send_if_modified(|state| state.update_success.take().is_some());
    }
}
