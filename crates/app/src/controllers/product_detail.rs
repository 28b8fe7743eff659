//! Product detail screen.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use shopfront_client::EnvelopeExt;
use shopfront_client::repositories::{CartRepository, ProductRepository};
use shopfront_core::{Product, ProductId};
use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::SyncConfig;
use crate::debounce::Debouncer;
use crate::messages;
use crate::reconcile::product_changed;
use crate::tasks::TaskScope;
use crate::ticker::Ticker;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductDetailState {
    pub is_loading: bool,
    pub product: Option<Product>,
    pub related_products: Vec<Product>,
    pub error_message: Option<String>,
    pub success_message: Option<String>,
    pub is_refreshing: bool,
    pub views_count: i32,
    pub is_adding_to_cart: bool,
    pub last_updated: Option<DateTime<Utc>>,
}

struct Shared {
    products: ProductRepository,
    cart: CartRepository,
    state: watch::Sender<ProductDetailState>,
    /// Product the screen is currently showing or loading.
    current: Mutex<Option<Uuid>>,
    /// Products whose view has already been counted.
    viewed: Mutex<HashSet<Uuid>>,
}

impl Shared {
    fn current(&self) -> Option<Uuid> {
        *lock(&self.current)
    }

    fn is_current(&self, uuid: Uuid) -> bool {
        self.current() == Some(uuid)
    }

    /// Load `uuid` and return it when it ends up on screen.
    async fn load(&self, uuid: Uuid) -> Option<Product> {
        let previous = lock(&self.current).replace(uuid);
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error_message = None;
            state.success_message = None;
            if previous != Some(uuid) {
                state.related_products.clear();
            }
        });

        let result = self
            .products
            .get(uuid)
            .await
            .and_then(EnvelopeExt::into_result);

        if !self.is_current(uuid) {
            debug!(%uuid, "Discarding product response after navigation");
            return None;
        }

        match result {
            Ok(Some(product)) => {
                info!(%uuid, product_id = %product.id, "Product loaded");
                let shown = product.clone();
                self.state.send_modify(|state| {
                    state.is_loading = false;
                    state.views_count = product.views_count;
                    state.product = Some(product);
                    state.last_updated = Some(Utc::now());
                });
                Some(shown)
            }
            Ok(None) => {
                self.fail(messages::PRODUCT_NOT_FOUND.to_string());
                None
            }
            Err(e) => {
                warn!(%uuid, error = %e, "Product load failed");
                self.fail(messages::LOAD_PRODUCT.describe(&e));
                None
            }
        }
    }

    fn fail(&self, message: String) {
        self.state.send_modify(|state| {
            state.is_loading = false;
            state.error_message = Some(message);
        });
    }

    /// Refetch `uuid` and replace it only when a tracked field changed.
    async fn refresh_silently(&self, uuid: Uuid) {
        let fresh = match self.products.get(uuid).await.and_then(EnvelopeExt::into_result) {
            Ok(Some(product)) => product,
            Ok(None) => return,
            Err(e) => {
                warn!(%uuid, error = %e, "Silent product refresh failed");
                return;
            }
        };

        if !self.is_current(uuid) {
            return;
        }

        let replaced = self.state.send_if_modified(|state| {
            if !product_changed(state.product.as_ref(), &fresh) {
                return false;
            }
            state.views_count = fresh.views_count;
            state.product = Some(fresh);
            state.last_updated = Some(Utc::now());
            true
        });
        if replaced {
            info!(%uuid, "Silent refresh updated product");
        }
    }

    async fn load_related(&self, uuid: Uuid, category: &str, exclude: ProductId, fetch: u32, keep: u32) {
        let page = match self
            .products
            .by_category(category, fetch)
            .await
            .and_then(EnvelopeExt::into_result)
        {
            Ok(page) => page.unwrap_or_default(),
            Err(e) => {
                debug!(category, error = %e, "Related products unavailable");
                return;
            }
        };

        let related: Vec<Product> = page
            .products
            .into_iter()
            .filter(|product| product.id != exclude)
            .take(keep as usize)
            .collect();

        if self.is_current(uuid) {
            self.state.send_modify(|state| state.related_products = related);
        }
    }

    /// Count one view of `uuid` if it is still shown and was not counted yet.
    fn count_view(&self, uuid: Uuid) {
        if !self.is_current(uuid) || !lock(&self.viewed).insert(uuid) {
            return;
        }
        // No backend endpoint records views; only the shown count moves.
        self.state.send_if_modified(|state| match state.product.as_mut() {
            Some(product) if product.uuid == uuid => {
                product.views_count += 1;
                state.views_count = product.views_count;
                true
            }
            _ => false,
        });
        debug!(%uuid, "Product view counted");
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Controller behind the product detail screen.
///
/// After a successful load it fetches related products in the background,
/// counts a view once the product has stayed on screen for the settle delay,
/// and silently refreshes the shown product on a fixed period.
pub struct ProductDetailController {
    shared: Arc<Shared>,
    config: SyncConfig,
    auto_refresh_enabled: AtomicBool,
    auto_refresh: Ticker,
    view_settle: Debouncer,
    tasks: TaskScope,
}

impl std::fmt::Debug for ProductDetailController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductDetailController")
            .field("current", &self.shared.current())
            .field("auto_refresh", &self.auto_refresh.is_running())
            .finish_non_exhaustive()
    }
}

impl ProductDetailController {
    #[must_use]
    pub fn new(products: ProductRepository, cart: CartRepository, config: SyncConfig) -> Self {
        let (state, _) = watch::channel(ProductDetailState::default());
        Self {
            shared: Arc::new(Shared {
                products,
                cart,
                state,
                current: Mutex::new(None),
                viewed: Mutex::new(HashSet::new()),
            }),
            config,
            auto_refresh_enabled: AtomicBool::new(true),
            auto_refresh: Ticker::new(config.refresh_interval),
            view_settle: Debouncer::new(config.view_settle),
            tasks: TaskScope::new(),
        }
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ProductDetailState> {
        self.shared.state.subscribe()
    }

    #[must_use]
    pub fn state(&self) -> ProductDetailState {
        self.shared.state.borrow().clone()
    }

    /// Product being shown or loaded.
    #[must_use]
    pub fn current_product_id(&self) -> Option<Uuid> {
        self.shared.current()
    }

    /// Show product `uuid`.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub async fn load_product(&self, uuid: Uuid) {
        self.auto_refresh.stop();
        let Some(product) = self.shared.load(uuid).await else {
            return;
        };

        let shared = Arc::clone(&self.shared);
        let fetch = self.config.related_fetch_limit();
        let keep = self.config.related_limit;
        self.tasks.spawn(async move {
            shared
                .load_related(uuid, &product.category, product.id, fetch, keep)
                .await;
        });

        let shared = Arc::clone(&self.shared);
        self.view_settle.trigger(move || async move { shared.count_view(uuid) });

        if self.auto_refresh_enabled.load(Ordering::SeqCst) {
            self.start_auto_refresh(uuid);
        }
    }

    /// Refetch the shown product, flagging `is_refreshing` meanwhile.
    pub async fn refresh_product(&self) {
        let Some(uuid) = self.shared.current() else {
            return;
        };
        self.shared.state.send_modify(|state| state.is_refreshing = true);
        self.shared.refresh_silently(uuid).await;
        self.shared.state.send_modify(|state| state.is_refreshing = false);
    }

    /// Add `quantity` units of `product_id` to the cart.
    pub async fn add_to_cart(&self, product_id: ProductId, quantity: i32) {
        self.shared.state.send_modify(|state| {
            state.is_adding_to_cart = true;
            state.error_message = None;
            state.success_message = None;
        });

        let result = self
            .shared
            .cart
            .add(product_id, quantity)
            .await
            .and_then(EnvelopeExt::into_result);

        self.shared.state.send_modify(|state| {
            state.is_adding_to_cart = false;
            match result {
                Ok(_) => {
                    info!(%product_id, quantity, "Added to cart from product detail");
                    state.success_message = Some(messages::PRODUCT_ADDED_TO_CART.to_string());
                }
                Err(e) => {
                    warn!(%product_id, error = %e, "Add to cart failed");
                    state.error_message = Some(messages::DETAIL_ADD_TO_CART.describe(&e));
                }
            }
        });
    }

    pub fn pause_auto_refresh(&self) {
        self.auto_refresh_enabled.store(false, Ordering::SeqCst);
        self.auto_refresh.stop();
    }

    pub fn resume_auto_refresh(&self) {
        self.auto_refresh_enabled.store(true, Ordering::SeqCst);
        let shown = self.shared.state.borrow().product.as_ref().map(|product| product.uuid);
        if let Some(uuid) = shown.filter(|uuid| self.shared.is_current(*uuid))
            && !self.auto_refresh.is_running()
        {
            self.start_auto_refresh(uuid);
        }
    }

    #[must_use]
    pub fn is_auto_refreshing(&self) -> bool {
        self.auto_refresh.is_running()
    }

    pub fn clear_error(&self) {
        self.shared
            .state
            .send_if_modified(|state| state.error_message.take().is_some());
    }

    pub fn clear_messages(&self) {
        self.shared.state.send_if_modified(|state| {
            let had = state.error_message.is_some() || state.success_message.is_some();
            state.error_message = None;
            state.success_message = None;
            had
        });
    }

    fn start_auto_refresh(&self, uuid: Uuid) {
        let shared = Arc::clone(&self.shared);
        self.auto_refresh.start(move || {
            let shared = Arc::clone(&shared);
            async move {
                let due = !shared.state.borrow().is_loading && shared.is_current(uuid);
                if due {
                    shared.refresh_silently(uuid).await;
                }
            }
        });
    }
}
