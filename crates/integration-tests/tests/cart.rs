//! Cart screen against a mock backend.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use serde_json::json;
use shopfront_core::{CartItemId, ProductId};
use shopfront_integration_tests::{Backend, api, cart_json, quiet_sync, success};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_add_replaces_cart_with_server_copy() {
    let backend = Backend::start().await;
    Mock::given(method("POST"))
        .and(path(api("cart/items")))
        .and(body_json(json!({ "productId": 7, "quantity": 1 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(success(cart_json(7, 1, 19.99))))
        .expect(1)
        .mount(&backend.server)
        .await;

    let screen = backend.app(quiet_sync()).cart();
    screen.add_to_cart(ProductId::new(7), 1).await;

    let state = screen.state();
    assert!(!state.action_in_progress);
    assert_eq!(state.cart_count, 1);
    assert_eq!(state.total_amount, Decimal::new(1999, 2));
    assert_eq!(state.success_message.as_deref(), Some("Producto agregado al carrito"));
    assert!(state.error_message.is_none());
}

#[tokio::test]
async fn test_zero_quantity_deletes_the_line() {
    let backend = Backend::start().await;
    Mock::given(method("DELETE"))
        .and(path(api("cart/items/11")))
        .respond_with(ResponseTemplate::new(200).set_body_json(success(json!({
            "id": 1,
            "uuid": "7d5c7f0e-2f1a-4c7b-8f36-3f3c1c0b9a10",
            "userId": 3,
            "status": "active",
            "totalItems": 0,
            "totalAmount": 0,
            "currency": "USD",
            "items": []
        }))))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend.server)
        .await;

    let screen = backend.app(quiet_sync()).cart();
    screen.update_item_quantity(CartItemId::new(11), 0).await;

    let state = screen.state();
    assert_eq!(state.cart_count, 0);
    assert!(state.cart.as_ref().is_some_and(shopfront_core::Cart::is_empty));
    assert_eq!(state.success_message.as_deref(), Some("Operación realizada exitosamente"));
}

#[tokio::test]
async fn test_positive_quantity_sends_put() {
    let backend = Backend::start().await;
    Mock::given(method("PUT"))
        .and(path(api("cart/items/11")))
        .and(body_json(json!({ "quantity": 3 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(success(cart_json(7, 3, 59.97))))
        .expect(1)
        .mount(&backend.server)
        .await;

    let screen = backend.app(quiet_sync()).cart();
    screen.update_item_quantity(CartItemId::new(11), 3).await;

    let state = screen.state();
    assert_eq!(state.cart_count, 3);
    assert_eq!(state.total_amount, Decimal::new(5997, 2));
}

#[tokio::test]
async fn test_failed_action_keeps_snapshot() {
    let backend = Backend::start().await;
    Mock::given(method("GET"))
        .and(path(api("cart")))
        .respond_with(ResponseTemplate::new(200).set_body_json(success(cart_json(7, 2, 39.98))))
        .mount(&backend.server)
        .await;
    Mock::given(method("PUT"))
        .and(path(api("cart/items/11")))
        .respond_with(ResponseTemplate::new(409))
        .mount(&backend.server)
        .await;

    let screen = backend.app(quiet_sync()).cart();
    screen.load_cart().await;
    let before = screen.state().cart;

    screen.update_item_quantity(CartItemId::new(11), 9).await;

    let state = screen.state();
    assert!(!state.action_in_progress);
    assert_eq!(state.error_message.as_deref(), Some("Conflicto en la operación"));
    assert_eq!(state.cart, before);
    assert_eq!(state.cart_count, 2);
}

#[tokio::test]
async fn test_load_failure_clears_cart() {
    let backend = Backend::start().await;
    Mock::given(method("GET"))
        .and(path(api("cart")))
        .respond_with(ResponseTemplate::new(401))
        .mount(&backend.server)
        .await;

    let screen = backend.app(quiet_sync()).cart();
    screen.load_cart().await;

    let state = screen.state();
    assert!(!state.is_loading);
    assert!(state.cart.is_none());
    assert_eq!(state.cart_count, 0);
    assert_eq!(
        state.error_message.as_deref(),
        Some("Sesión expirada, inicia sesión nuevamente")
    );
}

#[tokio::test]
async fn test_count_failure_zeroes_badge_silently() {
    let backend = Backend::start().await;
    Mock::given(method("GET"))
        .and(path(api("cart/count")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(success(json!({ "count": 4, "totalAmount": 79.96 }))),
        )
        .up_to_n_times(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path(api("cart/count")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&backend.server)
        .await;

    let screen = backend.app(quiet_sync()).cart();
    screen.load_cart_count().await;
    assert_eq!(screen.state().cart_count, 4);

    screen.load_cart_count().await;
    let state = screen.state();
    assert_eq!(state.cart_count, 0);
    assert_eq!(state.total_amount, Decimal::ZERO);
    assert!(state.error_message.is_none());
}

#[tokio::test]
async fn test_saved_items_and_reset() {
    let backend = Backend::start().await;
    Mock::given(method("GET"))
        .and(path(api("cart/saved-items")))
        .respond_with(ResponseTemplate::new(200).set_body_json(success(json!([{
            "id": 12,
            "uuid": "0b0f6a38-64c5-4d8e-9f3b-5d2f0c7a1e22",
            "cartId": 1,
            "productId": 8,
            "quantity": 1,
            "unitPrice": 5.5,
            "totalPrice": 5.5
        }]))))
        .mount(&backend.server)
        .await;

    let screen = backend.app(quiet_sync()).cart();
    screen.load_saved_items().await;
    assert_eq!(screen.state().saved_items.len(), 1);
    assert_eq!(backend.hits("GET", &api("cart/saved-items")).await, 1);

    screen.reset();
    assert!(screen.state().saved_items.is_empty());
}

fn empty_cart() -> serde_json::Value {
    json!({
        "id": 1,
        "uuid": "7d5c7f0e-2f1a-4c7b-8f36-3f3c1c0b9a10",
        "userId": 3,
        "status": "active",
        "totalItems": 0,
        "totalAmount": 0,
        "currency": "USD",
        "items": []
    })
}

#[tokio::test]
async fn test_save_for_later_posts_item_and_takes_server_cart() {
    let backend = Backend::start().await;
    Mock::given(method("POST"))
        .and(path(api("cart/save-for-later/11")))
        .respond_with(ResponseTemplate::new(200).set_body_json(success(empty_cart())))
        .expect(1)
        .mount(&backend.server)
        .await;

    let screen = backend.app(quiet_sync()).cart();
    screen.save_for_later(CartItemId::new(11)).await;

    let state = screen.state();
    assert!(!state.action_in_progress);
    assert_eq!(state.cart_count, 0);
    assert_eq!(state.success_message.as_deref(), Some("Operación realizada exitosamente"));
    assert_eq!(backend.hits("POST", &api("cart/save-for-later/11")).await, 1);
}

#[tokio::test]
async fn test_clear_cart_sends_delete() {
    let backend = Backend::start().await;
    Mock::given(method("GET"))
        .and(path(api("cart")))
        .respond_with(ResponseTemplate::new(200).set_body_json(success(cart_json(7, 2, 39.98))))
        .mount(&backend.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(api("cart")))
        .respond_with(ResponseTemplate::new(200).set_body_json(success(empty_cart())))
        .expect(1)
        .mount(&backend.server)
        .await;

    let screen = backend.app(quiet_sync()).cart();
    screen.load_cart().await;
    assert_eq!(screen.state().cart_count, 2);

    screen.clear_cart().await;

    let state = screen.state();
    assert_eq!(state.cart_count, 0);
    assert_eq!(state.total_amount, Decimal::ZERO);
    assert!(state.cart.as_ref().is_some_and(shopfront_core::Cart::is_empty));
    assert!(state.error_message.is_none());
}

#[tokio::test]
async fn test_initialize_for_new_user_drops_previous_state() {
    let backend = Backend::start().await;
    Mock::given(method("GET"))
        .and(path(api("cart")))
        .respond_with(ResponseTemplate::new(200).set_body_json(success(cart_json(9, 1, 19.99))))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("POST"))
        .and(path(api("cart/items")))
        .respond_with(ResponseTemplate::new(400))
        .mount(&backend.server)
        .await;

    let screen = backend.app(quiet_sync()).cart();
    screen.add_to_cart(ProductId::new(7), 1).await;
    assert!(screen.state().error_message.is_some());

    screen.initialize_for_new_user().await;

    let state = screen.state();
    assert!(!state.is_loading);
    assert!(state.error_message.is_none());
    assert!(state.saved_items.is_empty());
    assert_eq!(state.cart_count, 1);
    assert_eq!(
        state.cart.as_ref().and_then(|cart| cart.items.first()).map(|item| item.product_id),
        Some(ProductId::new(9))
    );
    assert_eq!(backend.hits("GET", &api("cart")).await, 1);
}
