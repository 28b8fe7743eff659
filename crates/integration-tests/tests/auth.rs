//! Sign-in flow and its effect on later requests.

#![allow(clippy::unwrap_used)]

use secrecy::SecretString;
use serde_json::json;
use shopfront_core::NewAccount;
use shopfront_integration_tests::{
    Backend, api, auth_json, failure, page, quiet_sync, success,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

fn secret(value: &str) -> SecretString {
    SecretString::from(value.to_string())
}

#[tokio::test]
async fn test_login_authorizes_later_requests_until_logout() {
    let backend = Backend::start().await;
    Mock::given(method("POST"))
        .and(path(api("auth/login")))
        .and(body_json(json!({ "email": "ana@example.com", "password": "secreta" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(success(auth_json("Cliente", "tok-123"))),
        )
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path(api("products")))
        .respond_with(ResponseTemplate::new(200).set_body_json(success(page(vec![]))))
        .mount(&backend.server)
        .await;

    let app = backend.app(quiet_sync());
    let auth = app.auth();
    auth.login(" ana@example.com ", &secret("secreta")).await;

    let state = auth.state();
    assert!(!state.is_loading);
    assert!(state.is_logged_in);
    assert_eq!(state.user.as_ref().map(|u| u.name.as_str()), Some("Ana"));
    assert!(app.session().is_authenticated().await);

    let catalogue = app.product_list();
    catalogue.load_products().await;

    auth.logout().await;
    assert!(!auth.state().is_logged_in);
    assert!(!app.session().is_authenticated().await);
    catalogue.load_products().await;

    let requests: Vec<_> = backend
        .server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.url.path() == api("products"))
        .collect();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[0].headers.get("authorization").unwrap().to_str().unwrap(),
        "Bearer tok-123"
    );
    assert!(!requests[1].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_rejected_login_shows_fixed_message() {
    let backend = Backend::start().await;
    Mock::given(method("POST"))
        .and(path(api("auth/login")))
        .respond_with(ResponseTemplate::new(401))
        .mount(&backend.server)
        .await;

    let app = backend.app(quiet_sync());
    let auth = app.auth();
    auth.login("ana@example.com", &secret("mala")).await;

    let state = auth.state();
    assert!(!state.is_loading);
    assert!(!state.is_logged_in);
    assert_eq!(
        state.error_message.as_deref(),
        Some("Upss, Verifica bien si sus datos son correctos :)")
    );
    assert!(!app.session().is_authenticated().await);

    auth.clear_error();
    assert!(auth.state().error_message.is_none());
}

#[tokio::test]
async fn test_business_failure_shows_backend_message() {
    let backend = Backend::start().await;
    Mock::given(method("POST"))
        .and(path(api("auth/login")))
        .respond_with(ResponseTemplate::new(200).set_body_json(failure("Credenciales inválidas")))
        .mount(&backend.server)
        .await;

    let auth = backend.app(quiet_sync()).auth();
    auth.login("ana@example.com", &secret("mala")).await;

    assert_eq!(
        auth.state().error_message.as_deref(),
        Some("Credenciales inválidas")
    );
}

#[tokio::test]
async fn test_register_sends_default_role_and_signs_in() {
    let backend = Backend::start().await;
    Mock::given(method("POST"))
        .and(path(api("auth/register")))
        .and(body_json(json!({
            "name": "Ana",
            "lastName": "López",
            "email": "ana@example.com",
            "password": "secreta",
            "phone": "5551234",
            "role": "Cliente"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(success(auth_json("Cliente", "tok-new"))),
        )
        .expect(1)
        .mount(&backend.server)
        .await;

    let app = backend.app(quiet_sync());
    let auth = app.auth();
    let account = NewAccount {
        name: "Ana".to_string(),
        last_name: "López".to_string(),
        email: "ana@example.com".to_string(),
        phone: Some("5551234".to_string()),
    };
    auth.register(&account, &secret("secreta")).await;

    assert!(auth.state().is_logged_in);
    assert!(!auth.can_manage_products());
    assert!(app.session().is_authenticated().await);
}

#[tokio::test]
async fn test_seller_can_manage_products() {
    let backend = Backend::start().await;
    Mock::given(method("POST"))
        .and(path(api("auth/login")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(success(auth_json("vendedor", "tok-9"))),
        )
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path(api("products/my-products")))
        .and(header("authorization", "Bearer tok-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success(page(vec![]))))
        .expect(1)
        .mount(&backend.server)
        .await;

    let app = backend.app(quiet_sync());
    let auth = app.auth();
    auth.login("ana@example.com", &secret("secreta")).await;
    assert!(auth.can_manage_products());

    let mine = app.my_products();
    mine.load_my_products().await;
    assert!(mine.state().error_message.is_none());
}
