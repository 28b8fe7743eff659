//! New product form.

use shopfront_client::EnvelopeExt;
use shopfront_client::repositories::ProductRepository;
use shopfront_core::{NewProduct, Product};
use tokio::sync::watch;
use tracing::{info, instrument, warn};

use crate::messages;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AddProductState {
    pub is_loading: bool,
    pub is_success: bool,
    pub error_message: Option<String>,
    /// Server copy of the product just created.
    pub created: Option<Product>,
}

#[derive(Debug)]
pub struct AddProductController {
    products: ProductRepository,
    state: watch::Sender<AddProductState>,
}

impl AddProductController {
    #[must_use]
    pub fn new(products: ProductRepository) -> Self {
        let (state, _) = watch::channel(AddProductState::default());
        Self { products, state }
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AddProductState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn state(&self) -> AddProductState {
        self.state.borrow().clone()
    }

    /// Submit the form.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn add_product(&self, product: &NewProduct) {
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.is_success = false;
            state.error_message = None;
        });

        let result = self
            .products
            .create(product)
            .await
            .and_then(EnvelopeExt::into_result);

        self.state.send_modify(|state| {
            state.is_loading = false;
            match result {
                Ok(created) => {
                    info!(product_id = ?created.as_ref().map(|p| p.id), "Product created");
                    state.is_success = true;
                    state.created = created;
                }
                Err(e) => {
                    warn!(error = %e, "Product create failed");
                    state.error_message = Some(messages::CREATE_PRODUCT.describe(&e));
                }
            }
        });
    }

    pub fn clear_error(&self) {
        self.state
            .send_if_modified(|state| state.error_message.take().is_some());
    }

    /// Acknowledge a successful submission.
    pub fn clear_success(&self) {
        self.state.send_if_modified(|state| {
            let had = state.is_success;
            state.is_success = false;
            state.created = None;
            had
        });
    }
}
