//! HTTP gateway to the storefront REST backend.
//!
//! One method per endpoint. Each call makes a single attempt, attaches the
//! session's bearer token when one is present, and hands the decoded envelope
//! back untouched. Interpreting `status`/`message` is left to the caller.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use shopfront_core::{
    AuthData, Cart, CartItem, CartItemId, CartSummary, Envelope, NewAccount, NewProduct, Product,
    ProductFilter, ProductId, ProductPage, ProductUpdate,
};
use tracing::instrument;
use url::Url;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::session::SessionStore;

/// Longest body excerpt written to the log when decoding fails.
const BODY_LOG_LIMIT: usize = 512;

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest<'a> {
    name: &'a str,
    last_name: &'a str,
    email: &'a str,
    password: &'a str,
    phone: Option<&'a str>,
    role: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddToCartRequest {
    product_id: ProductId,
    quantity: i32,
}

#[derive(Serialize)]
struct UpdateCartItemRequest {
    quantity: i32,
}

/// Storefront REST client.
///
/// Cheap to clone; all clones share one connection pool and one session.
#[derive(Clone)]
pub struct Gateway {
    inner: Arc<GatewayInner>,
}

struct GatewayInner {
    client: reqwest::Client,
    base_url: Url,
    session: SessionStore,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl Gateway {
    /// Build a gateway for `config` reading tokens from `session`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig, session: SessionStore) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .timeout(config.request_deadline())
            .build()?;

        Ok(Self {
            inner: Arc::new(GatewayInner {
                client,
                base_url: config.base_url.clone(),
                session,
            }),
        })
    }

    /// The session this gateway authenticates with.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// `POST auth/login`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or an
    /// undecodable body.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Envelope<AuthData>, ApiError> {
        let body = LoginRequest {
            email,
            password: password.expose_secret(),
        };
        let request = self.inner.client.post(self.endpoint("auth/login")?).json(&body);
        self.execute(request).await
    }

    /// `POST auth/register`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or an
    /// undecodable body.
    #[instrument(skip(self, account, password), fields(email = %account.email, role = %role))]
    pub async fn register(
        &self,
        account: &NewAccount,
        password: &SecretString,
        role: &str,
    ) -> Result<Envelope<AuthData>, ApiError> {
        let body = RegisterRequest {
            name: &account.name,
            last_name: &account.last_name,
            email: &account.email,
            password: password.expose_secret(),
            phone: account.phone.as_deref(),
            role,
        };
        let request = self
            .inner
            .client
            .post(self.endpoint("auth/register")?)
            .json(&body);
        self.execute(request).await
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// `GET products` with optional filters.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or an
    /// undecodable body.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<Envelope<ProductPage>, ApiError> {
        let mut url = self.endpoint("products")?;
        append_query(&mut url, &filter.query_pairs());
        self.execute(self.inner.client.get(url)).await
    }

    /// `GET products/search?search=<query>`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or an
    /// undecodable body.
    #[instrument(skip(self))]
    pub async fn search_products(
        &self,
        query: &str,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<Envelope<ProductPage>, ApiError> {
        let mut url = self.endpoint("products/search")?;
        let mut pairs = vec![("search", query.to_string())];
        if let Some(page) = page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = limit {
            pairs.push(("limit", limit.to_string()));
        }
        append_query(&mut url, &pairs);
        self.execute(self.inner.client.get(url)).await
    }

    /// `GET products/{uuid}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or an
    /// undecodable body.
    #[instrument(skip(self))]
    pub async fn get_product(&self, uuid: Uuid) -> Result<Envelope<Product>, ApiError> {
        let url = self.endpoint(&format!("products/{uuid}"))?;
        self.execute(self.inner.client.get(url)).await
    }

    /// `GET products/my-products`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or an
    /// undecodable body.
    #[instrument(skip(self))]
    pub async fn my_products(&self) -> Result<Envelope<ProductPage>, ApiError> {
        let url = self.endpoint("products/my-products")?;
        self.execute(self.inner.client.get(url)).await
    }

    /// `POST products`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or an
    /// undecodable body.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn create_product(&self, product: &NewProduct) -> Result<Envelope<Product>, ApiError> {
        let request = self.inner.client.post(self.endpoint("products")?).json(product);
        self.execute(request).await
    }

    /// `PUT products/{uuid}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or an
    /// undecodable body.
    #[instrument(skip(self, update))]
    pub async fn update_product(
        &self,
        uuid: Uuid,
        update: &ProductUpdate,
    ) -> Result<Envelope<Product>, ApiError> {
        let url = self.endpoint(&format!("products/{uuid}"))?;
        self.execute(self.inner.client.put(url).json(update)).await
    }

    /// `DELETE products/{uuid}`
    ///
    /// The response payload is ignored.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or an
    /// undecodable body.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, uuid: Uuid) -> Result<Envelope<IgnoredAny>, ApiError> {
        let url = self.endpoint(&format!("products/{uuid}"))?;
        self.execute(self.inner.client.delete(url)).await
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// `GET cart`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or an
    /// undecodable body.
    #[instrument(skip(self))]
    pub async fn get_cart(&self) -> Result<Envelope<Cart>, ApiError> {
        let url = self.endpoint("cart")?;
        self.execute(self.inner.client.get(url)).await
    }

    /// `GET cart/count`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or an
    /// undecodable body.
    #[instrument(skip(self))]
    pub async fn cart_count(&self) -> Result<Envelope<CartSummary>, ApiError> {
        let url = self.endpoint("cart/count")?;
        self.execute(self.inner.client.get(url)).await
    }

    /// `POST cart/items`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or an
    /// undecodable body.
    #[instrument(skip(self))]
    pub async fn add_cart_item(
        &self,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<Envelope<Cart>, ApiError> {
        let body = AddToCartRequest {
            product_id,
            quantity,
        };
        let request = self.inner.client.post(self.endpoint("cart/items")?).json(&body);
        self.execute(request).await
    }

    /// `PUT cart/items/{itemId}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or an
    /// undecodable body.
    #[instrument(skip(self))]
    pub async fn update_cart_item(
        &self,
        item_id: CartItemId,
        quantity: i32,
    ) -> Result<Envelope<Cart>, ApiError> {
        let url = self.endpoint(&format!("cart/items/{item_id}"))?;
        let request = self
            .inner
            .client
            .put(url)
            .json(&UpdateCartItemRequest { quantity });
        self.execute(request).await
    }

    /// `DELETE cart/items/{itemId}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or an
    /// undecodable body.
    #[instrument(skip(self))]
    pub async fn remove_cart_item(&self, item_id: CartItemId) -> Result<Envelope<Cart>, ApiError> {
        let url = self.endpoint(&format!("cart/items/{item_id}"))?;
        self.execute(self.inner.client.delete(url)).await
    }

    /// `DELETE cart`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or an
    /// undecodable body.
    #[instrument(skip(self))]
    pub async fn clear_cart(&self) -> Result<Envelope<Cart>, ApiError> {
        let url = self.endpoint("cart")?;
        self.execute(self.inner.client.delete(url)).await
    }

    /// `POST cart/save-for-later/{itemId}`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or an
    /// undecodable body.
    #[instrument(skip(self))]
    pub async fn save_for_later(&self, item_id: CartItemId) -> Result<Envelope<Cart>, ApiError> {
        let url = self.endpoint(&format!("cart/save-for-later/{item_id}"))?;
        self.execute(self.inner.client.post(url)).await
    }

    /// `GET cart/saved-items`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status or an
    /// undecodable body.
    #[instrument(skip(self))]
    pub async fn saved_items(&self) -> Result<Envelope<Vec<CartItem>>, ApiError> {
        let url = self.endpoint("cart/saved-items")?;
        self.execute(self.inner.client.get(url)).await
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// Send a request once and decode the envelope.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Envelope<T>, ApiError> {
        let request = match self.inner.session.token().await {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "Backend request failed");
            ApiError::Transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), url = %response.url(), "Backend returned error status");
            return Err(ApiError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %truncate(&body, BODY_LOG_LIMIT),
                "Failed to decode backend envelope"
            );
            ApiError::Decode(e)
        })
    }
}

fn append_query(url: &mut Url, pairs: &[(&str, String)]) {
    if pairs.is_empty() {
        return;
    }
    let mut query = url.query_pairs_mut();
    for (key, value) in pairs {
        query.append_pair(key, value);
    }
}

fn truncate(text: &str, limit: usize) -> &str {
    if text.len() <= limit {
        return text;
    }
    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.get(..end).unwrap_or(text)
}
