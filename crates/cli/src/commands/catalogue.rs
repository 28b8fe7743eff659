//! Catalogue commands: list, search, show and watch.

use std::time::Duration;

use shopfront_app::AppState;
use shopfront_app::controllers::ProductListState;
use shopfront_core::Product;
use uuid::Uuid;

use super::{CommandError, settled};

/// How long `product` waits for the related products to arrive.
const RELATED_WAIT: Duration = Duration::from_secs(2);

pub async fn list(app: &AppState) -> Result<(), CommandError> {
    let screen = app.product_list();
    screen.pause_auto_refresh();
    screen.load_products().await;
    let state = screen.state();
    print_listing(&state);
    settled(state.error_message)
}

pub async fn search(app: &AppState, query: &str) -> Result<(), CommandError> {
    let screen = app.product_list();
    screen.pause_auto_refresh();
    screen.search_products(query).await;
    let state = screen.state();
    print_listing(&state);
    settled(state.error_message)
}

/// Show one product, then whatever related products arrive shortly after.
pub async fn show(app: &AppState, uuid: Uuid) -> Result<(), CommandError> {
    let screen = app.product_detail();
    screen.pause_auto_refresh();
    screen.load_product(uuid).await;

    let mut changes = screen.subscribe();
    let state = screen.state();
    let Some(product) = state.product else {
        return settled(state.error_message.or_else(|| Some(format!("Producto {uuid} no disponible"))));
    };
    print_product(&product);

    let arrived = tokio::time::timeout(
        RELATED_WAIT,
        changes.wait_for(|state| !state.related_products.is_empty()),
    )
    .await;
    if let Ok(Ok(state)) = arrived {
        print_related(&state.related_products);
    }
    Ok(())
}

/// Keep the catalogue on screen, reprinting whenever it changes.
pub async fn watch(app: &AppState) -> Result<(), CommandError> {
    let screen = app.product_list();
    let mut changes = screen.subscribe();
    screen.load_products().await;
    print_listing(&screen.state());
    changes.mark_unchanged();

    tracing::info!(
        "Watching products, refreshing every {}s (Ctrl-C to stop)",
        app.sync().refresh_interval.as_secs()
    );

    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal?;
                tracing::info!("Stopping watch");
                break;
            }
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = changes.borrow_and_update().clone();
                if !state.is_loading {
                    print_listing(&state);
                }
            }
        }
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_listing(state: &ProductListState) {
    if let Some(query) = state.active_search() {
        println!("Resultados para \"{query}\":");
    }
    if state.products.is_empty() && state.error_message.is_none() {
        println!("(sin productos)");
    }
    for product in &state.products {
        println!(
            "{:>6}  {:<40} {:>10}  stock {:>4}  {}",
            product.id,
            product.name,
            product.formatted_price(),
            product.stock_quantity,
            product.uuid
        );
    }
}

#[allow(clippy::print_stdout)]
fn print_product(product: &Product) {
    println!("{} ({})", product.name, product.uuid);
    println!("  Precio:     {}", product.formatted_price());
    println!("  Categoría:  {}", product.category);
    println!("  Stock:      {}", product.stock_quantity);
    println!("  Vistas:     {}", product.views_count);
    if let Some(image) = product.display_image() {
        println!("  Imagen:     {image}");
    }
    if !product.description.is_empty() {
        println!();
        println!("{}", product.description);
    }
}

#[allow(clippy::print_stdout)]
fn print_related(related: &[Product]) {
    println!();
    println!("Productos relacionados:");
    for product in related {
        println!("  {:<40} {:>10}", product.name, product.formatted_price());
    }
}
