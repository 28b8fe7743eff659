//! Seller commands.

use shopfront_app::AppState;

use super::{CommandError, settled};

#[allow(clippy::print_stdout)]
pub async fn my_products(app: &AppState) -> Result<(), CommandError> {
    let screen = app.my_products();
    screen.load_my_products().await;
    let state = screen.state();
    for product in &state.my_products {
        println!(
            "{:>6}  {:<40} {:>10}  {:<10} {}",
            product.id,
            product.name,
            product.formatted_price(),
            product.status,
            product.uuid
        );
    }
    settled(state.error_message)
}
