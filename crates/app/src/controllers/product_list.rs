//! Product catalogue screen: full listing, search-as-you-type and a silent
//! background refresh.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use shopfront_client::repositories::ProductRepository;
use shopfront_client::{ApiError, EnvelopeExt};
use shopfront_core::{Product, ProductPage};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::SyncConfig;
use crate::debounce::Debouncer;
use crate::messages;
use crate::reconcile::listing_changed;
use crate::tasks::TaskScope;
use crate::ticker::Ticker;

/// What the catalogue screen renders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductListState {
    pub is_loading: bool,
    pub products: Vec<Product>,
    pub error_message: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
    pub is_search_mode: bool,
    pub current_search_query: String,
}

impl ProductListState {
    /// Active search query, if the screen shows search results.
    #[must_use]
    pub fn active_search(&self) -> Option<&str> {
        let query = self.current_search_query.trim();
        (self.is_search_mode && !query.is_empty()).then_some(query)
    }

    /// Background refresh only runs on a settled, error-free full listing.
    const fn wants_background_refresh(&self) -> bool {
        !self.is_loading && self.error_message.is_none() && !self.is_search_mode
    }
}

struct Shared {
    products: ProductRepository,
    state: watch::Sender<ProductListState>,
    /// Sequence number of the latest explicit load or search.
    latest: AtomicU64,
}

impl Shared {
    /// Mark a new explicit request and return its sequence number.
    fn begin(&self, search: Option<&str>) -> u64 {
        let mut request = 0;
        self.state.send_modify(|state| {
            request = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
            state.is_loading = true;
            state.error_message = None;
            state.is_search_mode = search.is_some();
            state.current_search_query = search.unwrap_or_default().to_string();
        });
        request
    }

    /// Apply the outcome of request `request` unless a newer one started.
    ///
    /// The newer request owns the loading flag and will settle it.
    fn finish(
        &self,
        request: u64,
        result: Result<Option<ProductPage>, ApiError>,
        describe: impl FnOnce(&ApiError) -> String,
    ) {
        self.state.send_if_modified(|state| {
            if self.latest.load(Ordering::SeqCst) != request {
                debug!(request, "Discarding superseded product response");
                return false;
            }
            state.is_loading = false;
            match result {
                Ok(page) => {
                    state.products = page.map(|page| page.products).unwrap_or_default();
                    state.last_updated = Some(Utc::now());
                    info!(count = state.products.len(), "Product list loaded");
                }
                Err(e) => {
                    warn!(error = %e, "Product list request failed");
                    state.error_message = Some(describe(&e));
                }
            }
            true
        });
    }

    async fn load_all(&self) {
        let request = self.begin(None);
        let result = self
            .products
            .list_all()
            .await
            .and_then(EnvelopeExt::into_result);
        self.finish(request, result, |e| messages::LOAD_PRODUCTS.describe(e));
    }

    async fn search(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            self.load_all().await;
            return;
        }

        let request = self.begin(Some(query));
        let result = self
            .products
            .search(query)
            .await
            .and_then(EnvelopeExt::into_result);
        self.finish(request, result, |e| messages::search_failed(e, query));
    }

    /// Refetch what is on screen and swap it in only when it changed.
    ///
    /// Never touches the loading flag or the error message.
    async fn refresh_silently(&self) {
        let started = self.latest.load(Ordering::SeqCst);
        let search = self.state.borrow().active_search().map(str::to_owned);

        let result = match &search {
            Some(query) => self.products.search(query).await,
            None => self.products.list_all().await,
        }
        .and_then(EnvelopeExt::into_result);

        let fresh = match result {
            Ok(page) => page.map(|page| page.products).unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Silent product refresh failed");
                return;
            }
        };

        let replaced = self.state.send_if_modified(|state| {
            if self.latest.load(Ordering::SeqCst) != started
                || !listing_changed(&state.products, &fresh)
            {
                return false;
            }
            state.products = fresh;
            state.last_updated = Some(Utc::now());
            true
        });

        if replaced {
            info!("Silent refresh replaced the product list");
        } else {
            debug!("Silent refresh found no changes");
        }
    }
}

/// Controller behind the catalogue screen.
///
/// Explicit operations are `async` and return once the state has settled.
/// Search-as-you-type, the periodic refresh and the post-create refresh run
/// on tasks owned by the controller and stop when it is dropped.
pub struct ProductListController {
    shared: Arc<Shared>,
    config: SyncConfig,
    search_debounce: Debouncer,
    auto_refresh: Ticker,
    tasks: TaskScope,
}

impl std::fmt::Debug for ProductListController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductListController")
            .field("state", &*self.shared.state.borrow())
            .field("auto_refresh", &self.auto_refresh.is_running())
            .finish_non_exhaustive()
    }
}

impl ProductListController {
    /// Create the controller and start the periodic silent refresh.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn new(products: ProductRepository, config: SyncConfig) -> Self {
        let (state, _) = watch::channel(ProductListState::default());
        let controller = Self {
            shared: Arc::new(Shared {
                products,
                state,
                latest: AtomicU64::new(0),
            }),
            config,
            search_debounce: Debouncer::new(config.search_debounce),
            auto_refresh: Ticker::new(config.refresh_interval),
            tasks: TaskScope::new(),
        };
        controller.start_auto_refresh();
        controller
    }

    /// Receiver that observes every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ProductListState> {
        self.shared.state.subscribe()
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> ProductListState {
        self.shared.state.borrow().clone()
    }

    /// Load every product and leave search mode.
    pub async fn load_products(&self) {
        self.search_debounce.cancel();
        self.shared.load_all().await;
    }

    /// Search immediately. A blank query loads everything instead.
    pub async fn search_products(&self, query: &str) {
        self.search_debounce.cancel();
        self.shared.search(query).await;
    }

    /// Feed the search box text; the search runs once typing pauses.
    pub fn on_query_changed(&self, query: impl Into<String>) {
        let shared = Arc::clone(&self.shared);
        let query = query.into();
        self.search_debounce
            .trigger(move || async move { shared.search(&query).await });
    }

    /// Repeat the active search, or reload everything outside search mode.
    pub async fn refresh(&self) {
        let search = self.state().active_search().map(str::to_owned);
        match search {
            Some(query) => self.search_products(&query).await,
            None => self.load_products().await,
        }
    }

    /// Leave search mode and show every product.
    pub async fn clear_search(&self) {
        self.load_products().await;
    }

    /// Refetch what is shown without loading indicators or error reporting.
    pub async fn refresh_silently(&self) {
        self.shared.refresh_silently().await;
    }

    /// A product was just created elsewhere; refresh shortly.
    ///
    /// Re-runs the active search, otherwise performs a silent refresh.
    pub fn on_product_added(&self) {
        let shared = Arc::clone(&self.shared);
        let delay = self.config.product_added_delay;
        self.tasks.spawn(async move {
            tokio::time::sleep(delay).await;
            let search = shared.state.borrow().active_search().map(str::to_owned);
            match search {
                Some(query) => shared.search(&query).await,
                None => shared.refresh_silently().await,
            }
        });
    }

    /// Dismiss the error message.
    pub fn clear_error(&self) {
        self.shared.state.send_if_modified(|state| state.error_message.take().is_some());
    }

    /// Stop the periodic refresh and drop a pending debounced search.
    pub fn pause_auto_refresh(&self) {
        if self.auto_refresh.stop() {
            debug!("Product list auto refresh paused");
        }
        self.search_debounce.cancel();
    }

    pub fn resume_auto_refresh(&self) {
        if !self.auto_refresh.is_running() {
            debug!("Product list auto refresh resumed");
            self.start_auto_refresh();
        }
    }

    #[must_use]
    pub fn is_auto_refreshing(&self) -> bool {
        self.auto_refresh.is_running()
    }

    #[must_use]
    pub fn is_in_search_mode(&self) -> bool {
        self.shared.state.borrow().is_search_mode
    }

    #[must_use]
    pub fn current_search_query(&self) -> String {
        self.shared.state.borrow().current_search_query.clone()
    }

    fn start_auto_refresh(&self) {
        let shared = Arc::clone(&self.shared);
        self.auto_refresh.start(move || {
            let shared = Arc::clone(&shared);
            async move {
                let due = shared.state.borrow().wants_background_refresh();
                if due {
                    shared.refresh_silently().await;
                } else {
                    debug!("Skipping background refresh");
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_search_requires_mode_and_text() {
        let mut state = ProductListState {
            is_search_mode: true,
            current_search_query: "  lámpara ".to_string(),
            ..ProductListState::default()
        };
        assert_eq!(state.active_search(), Some("lámpara"));

        state.current_search_query = "   ".to_string();
        assert_eq!(state.active_search(), None);

        state.current_search_query = "lámpara".to_string();
        state.is_search_mode = false;
        assert_eq!(state.active_search(), None);
    }

    #[test]
    fn test_background_refresh_skip_rules() {
        let settled = ProductListState::default();
        assert!(settled.wants_background_refresh());

        let loading = ProductListState {
            is_loading: true,
            ..ProductListState::default()
        };
        assert!(!loading.wants_background_refresh());

        let errored = ProductListState {
            error_message: Some("Error del servidor".to_string()),
            ..ProductListState::default()
        };
        assert!(!errored.wants_background_refresh());

        let searching = ProductListState {
            is_search_mode: true,
            current_search_query: "silla".to_string(),
            ..ProductListState::default()
        };
        assert!(!searching.wants_background_refresh());
    }
}
