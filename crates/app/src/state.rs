//! Application-wide wiring shared by every screen.

use std::sync::Arc;

use shopfront_client::repositories::{AuthRepository, CartRepository, ProductRepository};
use shopfront_client::{ApiError, ClientConfig, Gateway, SessionStore};

use crate::config::SyncConfig;
use crate::controllers::{
    AddProductController, AuthController, CartController, MyProductsController,
    ProductDetailController, ProductListController,
};

/// One session and one gateway for the whole app.
///
/// Cheap to clone. Controllers built from the same `AppState` see the same
/// signed-in user.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    sync: SyncConfig,
    session: SessionStore,
    gateway: Gateway,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("base_url", &self.inner.gateway.base_url().as_str())
            .field("sync", &self.inner.sync)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Build the shared session and HTTP gateway.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(client: &ClientConfig, sync: SyncConfig) -> Result<Self, ApiError> {
        let session = SessionStore::new();
        let gateway = Gateway::new(client, session.clone())?;
        Ok(Self {
            inner: Arc::new(AppStateInner {
                sync,
                session,
                gateway,
            }),
        })
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    #[must_use]
    pub fn gateway(&self) -> &Gateway {
        &self.inner.gateway
    }

    #[must_use]
    pub fn sync(&self) -> SyncConfig {
        self.inner.sync
    }

    fn products(&self) -> ProductRepository {
        ProductRepository::new(self.inner.gateway.clone())
    }

    fn carts(&self) -> CartRepository {
        CartRepository::new(self.inner.gateway.clone())
    }

    #[must_use]
    pub fn auth(&self) -> AuthController {
        AuthController::new(
            AuthRepository::new(self.inner.gateway.clone()),
            self.inner.session.clone(),
        )
    }

    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn product_list(&self) -> ProductListController {
        ProductListController::new(self.products(), self.inner.sync)
    }

    #[must_use]
    pub fn product_detail(&self) -> ProductDetailController {
        ProductDetailController::new(self.products(), self.carts(), self.inner.sync)
    }

    #[must_use]
    pub fn cart(&self) -> CartController {
        CartController::new(self.carts())
    }

    #[must_use]
    pub fn my_products(&self) -> MyProductsController {
        MyProductsController::new(self.products())
    }

    #[must_use]
    pub fn add_product(&self) -> AddProductController {
        AddProductController::new(self.products())
    }
}
