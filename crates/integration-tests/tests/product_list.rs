//! Catalogue screen against a mock backend.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use serde_json::json;
use shopfront_core::ProductId;
use shopfront_integration_tests::{
    Backend, WAIT, api, failure, page, product_json, quiet_sync, success,
};
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

async fn mount_listing(backend: &Backend, products: Vec<serde_json::Value>) {
    Mock::given(method("GET"))
        .and(path(api("products")))
        .respond_with(ResponseTemplate::new(200).set_body_json(success(page(products))))
        .mount(&backend.server)
        .await;
}

// =============================================================================
// Explicit loads
// =============================================================================

#[tokio::test]
async fn test_load_settles_with_products() {
    let backend = Backend::start().await;
    mount_listing(&backend, vec![product_json(1, Uuid::new_v4()), product_json(2, Uuid::new_v4())]).await;

    let screen = backend.app(quiet_sync()).product_list();
    screen.load_products().await;

    let state = screen.state();
    assert!(!state.is_loading);
    assert_eq!(state.products.len(), 2);
    assert!(state.error_message.is_none());
    assert!(state.last_updated.is_some());
    assert!(!state.is_search_mode);
}

#[tokio::test]
async fn test_load_failure_settles_with_message() {
    let backend = Backend::start().await;
    Mock::given(method("GET"))
        .and(path(api("products")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&backend.server)
        .await;

    let screen = backend.app(quiet_sync()).product_list();
    screen.load_products().await;

    let state = screen.state();
    assert!(!state.is_loading);
    assert_eq!(state.error_message.as_deref(), Some("Error del servidor"));
}

#[tokio::test]
async fn test_load_business_failure_uses_backend_message() {
    let backend = Backend::start().await;
    Mock::given(method("GET"))
        .and(path(api("products")))
        .respond_with(ResponseTemplate::new(200).set_body_json(failure("Catálogo en mantenimiento")))
        .mount(&backend.server)
        .await;

    let screen = backend.app(quiet_sync()).product_list();
    screen.load_products().await;

    let state = screen.state();
    assert!(!state.is_loading);
    assert_eq!(state.error_message.as_deref(), Some("Catálogo en mantenimiento"));
}

// =============================================================================
// Search
// =============================================================================

#[tokio::test]
async fn test_search_not_found_keeps_previous_list() {
    let backend = Backend::start().await;
    mount_listing(&backend, vec![product_json(1, Uuid::new_v4())]).await;
    Mock::given(method("GET"))
        .and(path(api("products/search")))
        .and(query_param("search", "xyz"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&backend.server)
        .await;

    let screen = backend.app(quiet_sync()).product_list();
    screen.load_products().await;
    screen.search_products("xyz").await;

    let state = screen.state();
    assert!(!state.is_loading);
    assert!(state.is_search_mode);
    assert_eq!(state.current_search_query, "xyz");
    assert_eq!(
        state.error_message.as_deref(),
        Some("No se encontraron productos para \"xyz\"")
    );
    assert_eq!(state.products.len(), 1);
}

#[tokio::test]
async fn test_blank_search_loads_everything() {
    let backend = Backend::start().await;
    mount_listing(&backend, vec![product_json(1, Uuid::new_v4())]).await;

    let screen = backend.app(quiet_sync()).product_list();
    screen.search_products("   ").await;

    let state = screen.state();
    assert!(!state.is_search_mode);
    assert_eq!(state.products.len(), 1);
    assert_eq!(backend.hits("GET", &api("products/search")).await, 0);
}

#[tokio::test]
async fn test_typing_burst_sends_one_search() {
    let backend = Backend::start().await;
    Mock::given(method("GET"))
        .and(path(api("products/search")))
        .and(query_param("search", "silla"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(success(page(vec![product_json(5, Uuid::new_v4())]))),
        )
        .mount(&backend.server)
        .await;

    let screen = backend.app(quiet_sync()).product_list();
    let mut changes = screen.subscribe();
    screen.on_query_changed("s");
    screen.on_query_changed("si");
    screen.on_query_changed("silla");

    tokio::time::timeout(
        WAIT,
        changes.wait_for(|state| {
            state.is_search_mode && !state.is_loading && state.current_search_query == "silla"
        }),
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(screen.state().products.len(), 1);
    assert_eq!(backend.hits("GET", &api("products/search")).await, 1);
}

#[tokio::test]
async fn test_clear_search_returns_to_full_listing() {
    let backend = Backend::start().await;
    mount_listing(&backend, vec![product_json(1, Uuid::new_v4()), product_json(2, Uuid::new_v4())]).await;
    Mock::given(method("GET"))
        .and(path(api("products/search")))
        .respond_with(ResponseTemplate::new(200).set_body_json(success(page(vec![]))))
        .mount(&backend.server)
        .await;

    let screen = backend.app(quiet_sync()).product_list();
    screen.search_products("mesa").await;
    assert!(screen.is_in_search_mode());

    screen.clear_search().await;
    assert!(!screen.is_in_search_mode());
    assert_eq!(screen.current_search_query(), "");
    assert_eq!(screen.state().products.len(), 2);
}

#[tokio::test]
async fn test_slow_search_response_does_not_overwrite_newer_one() {
    let backend = Backend::start().await;
    Mock::given(method("GET"))
        .and(path(api("products/search")))
        .and(query_param("search", "sil"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(success(page(vec![product_json(4, Uuid::new_v4())])))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path(api("products/search")))
        .and(query_param("search", "silla"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(success(page(vec![product_json(5, Uuid::new_v4())]))),
        )
        .mount(&backend.server)
        .await;

    let screen = backend.app(quiet_sync()).product_list();
    tokio::join!(screen.search_products("sil"), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        screen.search_products("silla").await;
    });

    let state = screen.state();
    assert!(!state.is_loading);
    assert_eq!(state.current_search_query, "silla");
    assert_eq!(state.products.len(), 1);
    assert_eq!(state.products[0].id, ProductId::new(5));
    assert_eq!(backend.hits("GET", &api("products/search")).await, 2);
}

// =============================================================================
// Silent refresh
// =============================================================================

#[tokio::test]
async fn test_silent_refresh_without_changes_does_not_notify() {
    let backend = Backend::start().await;
    let uuid = Uuid::new_v4();
    mount_listing(&backend, vec![product_json(1, uuid)]).await;

    let screen = backend.app(quiet_sync()).product_list();
    screen.load_products().await;
    let changes = screen.subscribe();

    screen.refresh_silently().await;

    assert!(!changes.has_changed().unwrap());
    assert_eq!(backend.hits("GET", &api("products")).await, 2);
}

#[tokio::test]
async fn test_silent_refresh_replaces_on_stock_change() {
    let backend = Backend::start().await;
    let uuid = Uuid::new_v4();
    mount_listing(&backend, vec![product_json(1, uuid)]).await;

    let screen = backend.app(quiet_sync()).product_list();
    screen.load_products().await;
    let changes = screen.subscribe();

    backend.server.reset().await;
    let mut fresh = product_json(1, uuid);
    fresh["stockQuantity"] = json!(0);
    mount_listing(&backend, vec![fresh]).await;

    screen.refresh_silently().await;

    assert!(changes.has_changed().unwrap());
    let state = screen.state();
    assert_eq!(state.products[0].stock_quantity, 0);
    assert!(!state.is_loading);
    assert!(state.error_message.is_none());
}

#[tokio::test]
async fn test_silent_refresh_ignores_name_only_edits() {
    let backend = Backend::start().await;
    let uuid = Uuid::new_v4();
    mount_listing(&backend, vec![product_json(1, uuid)]).await;

    let screen = backend.app(quiet_sync()).product_list();
    screen.load_products().await;

    backend.server.reset().await;
    let mut renamed = product_json(1, uuid);
    renamed["name"] = json!("Nombre nuevo");
    mount_listing(&backend, vec![renamed]).await;

    screen.refresh_silently().await;

    assert_eq!(screen.state().products[0].name, "Producto 1");
}

#[tokio::test]
async fn test_silent_refresh_failure_is_swallowed() {
    let backend = Backend::start().await;
    mount_listing(&backend, vec![product_json(1, Uuid::new_v4())]).await;

    let screen = backend.app(quiet_sync()).product_list();
    screen.load_products().await;

    backend.server.reset().await;
    Mock::given(method("GET"))
        .and(path(api("products")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&backend.server)
        .await;

    screen.refresh_silently().await;

    let state = screen.state();
    assert!(state.error_message.is_none());
    assert!(!state.is_loading);
    assert_eq!(state.products.len(), 1);
}

#[tokio::test]
async fn test_product_added_refreshes_after_delay() {
    let backend = Backend::start().await;
    mount_listing(&backend, vec![product_json(1, Uuid::new_v4())]).await;

    let screen = backend.app(quiet_sync()).product_list();
    screen.load_products().await;

    backend.server.reset().await;
    mount_listing(&backend, vec![product_json(1, Uuid::new_v4()), product_json(2, Uuid::new_v4())]).await;

    let mut changes = screen.subscribe();
    screen.on_product_added();

    tokio::time::timeout(WAIT, changes.wait_for(|state| state.products.len() == 2))
        .await
        .unwrap()
        .unwrap();
}

// =============================================================================
// Periodic refresh
// =============================================================================

#[tokio::test]
async fn test_periodic_refresh_runs_until_paused() {
    let backend = Backend::start().await;
    mount_listing(&backend, vec![product_json(1, Uuid::new_v4())]).await;

    let sync = quiet_sync().with_refresh_interval(Duration::from_millis(40));
    let screen = backend.app(sync).product_list();
    screen.load_products().await;
    assert!(screen.is_auto_refreshing());

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(backend.hits("GET", &api("products")).await >= 3);

    screen.pause_auto_refresh();
    assert!(!screen.is_auto_refreshing());
    tokio::time::sleep(Duration::from_millis(50)).await;
    let paused_at = backend.hits("GET", &api("products")).await;

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(backend.hits("GET", &api("products")).await, paused_at);

    screen.resume_auto_refresh();
    assert!(screen.is_auto_refreshing());
}
