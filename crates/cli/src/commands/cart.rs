//! Cart commands.

use shopfront_app::AppState;
use shopfront_app::controllers::CartState;
use shopfront_core::ProductId;

use super::{CommandError, settled};

pub async fn show(app: &AppState) -> Result<(), CommandError> {
    let screen = app.cart();
    screen.load_cart().await;
    let state = screen.state();
    print_cart(&state);
    settled(state.error_message)
}

pub async fn add(app: &AppState, product_id: ProductId, quantity: i32) -> Result<(), CommandError> {
    let screen = app.cart();
    screen.add_to_cart(product_id, quantity).await;
    let state = screen.state();
    if let Some(message) = &state.success_message {
        tracing::info!("{message}");
    }
    print_cart(&state);
    settled(state.error_message)
}

#[allow(clippy::print_stdout)]
fn print_cart(state: &CartState) {
    let Some(cart) = &state.cart else {
        return;
    };
    if cart.is_empty() {
        println!("El carrito está vacío");
        return;
    }
    for item in &cart.items {
        let name = item
            .product
            .as_ref()
            .map_or_else(|| format!("Producto {}", item.product_id), |p| p.name.clone());
        println!(
            "{:>6}  {:<40} x{:<3} {:>10}",
            item.id,
            name,
            item.quantity,
            item.formatted_total_price()
        );
    }
    println!("{} artículos, total {}", state.cart_count, cart.formatted_total());
}
