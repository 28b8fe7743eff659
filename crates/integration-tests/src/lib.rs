//! Test fixtures for driving the controllers against a mock backend.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! Every test starts its own [`MockServer`]; nothing touches the network.

use std::time::Duration;

use serde_json::{Value, json};
use shopfront_app::{AppState, SyncConfig};
use shopfront_client::ClientConfig;
use uuid::Uuid;
use wiremock::MockServer;

/// Path prefix of every backend endpoint.
pub const API: &str = "/API/v1";

/// Upper bound for waiting on background work in tests.
pub const WAIT: Duration = Duration::from_secs(2);

/// `"/API/v1/<path>"`
#[must_use]
pub fn api(path: &str) -> String {
    format!("{API}/{path}")
}

/// Timings that keep the periodic refresh out of the way.
#[must_use]
pub const fn quiet_sync() -> SyncConfig {
    SyncConfig {
        refresh_interval: Duration::from_secs(3600),
        search_debounce: Duration::from_millis(50),
        view_settle: Duration::from_millis(50),
        product_added_delay: Duration::from_millis(20),
        related_limit: 4,
    }
}

/// A mock backend and an app pointed at it.
pub struct Backend {
    pub server: MockServer,
}

impl Backend {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// App state talking to this backend.
    ///
    /// # Panics
    ///
    /// Panics if the mock server URI is not a valid base URL.
    #[must_use]
    pub fn app(&self, sync: SyncConfig) -> AppState {
        let client = ClientConfig::with_base_url(&format!("{}{API}", self.server.uri()))
            .expect("mock server uri is a valid base url")
            .timeouts(Duration::from_secs(5));
        AppState::new(&client, sync).expect("http client builds")
    }

    /// Number of requests received for `method` on `path`.
    pub async fn hits(&self, method: &str, path: &str) -> usize {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| request.method.as_str() == method && request.url.path() == path)
            .count()
    }
}

/// Success envelope around `data`.
#[must_use]
pub fn success(data: Value) -> Value {
    json!({ "status": "success", "data": data })
}

/// Business failure envelope.
#[must_use]
pub fn failure(message: &str) -> Value {
    json!({ "status": "error", "message": message })
}

/// A product in backend JSON form.
#[must_use]
pub fn product_json(id: i32, uuid: Uuid) -> Value {
    json!({
        "id": id,
        "uuid": uuid,
        "sellerId": 2,
        "name": format!("Producto {id}"),
        "description": "Descripción",
        "price": 19.99,
        "stockQuantity": 5,
        "category": "hogar",
        "images": [],
        "status": "active",
        "viewsCount": 10
    })
}

/// `{ products: [...] }` page payload.
#[must_use]
pub fn page(products: Vec<Value>) -> Value {
    json!({ "products": products })
}

/// A cart with one line for `product_id`.
#[must_use]
pub fn cart_json(product_id: i32, quantity: i32, total: f64) -> Value {
    json!({
        "id": 1,
        "uuid": Uuid::new_v4(),
        "userId": 3,
        "status": "active",
        "totalItems": quantity,
        "totalAmount": total,
        "currency": "USD",
        "items": [{
            "id": 11,
            "uuid": Uuid::new_v4(),
            "cartId": 1,
            "productId": product_id,
            "quantity": quantity,
            "unitPrice": 19.99,
            "totalPrice": total
        }]
    })
}

/// Login/register payload for a user with `role`.
#[must_use]
pub fn auth_json(role: &str, token: &str) -> Value {
    json!({
        "user": {
            "id": 3,
            "uuid": Uuid::new_v4(),
            "name": "Ana",
            "lastName": "López",
            "email": "ana@example.com",
            "role": role
        },
        "token": token
    })
}
