//! Change detection for silent refreshes.
//!
//! Only the fields that matter for buying decisions are compared. Edits to a
//! product's name, description, category or images alone are not picked up
//! by a silent refresh; an explicit load shows them.

use shopfront_core::Product;

/// Whether a refreshed listing differs from the one on screen.
///
/// Lists of different length always differ. Otherwise entries are compared
/// position by position on id, stock, price and status.
#[must_use]
pub fn listing_changed(current: &[Product], fresh: &[Product]) -> bool {
    if current.len() != fresh.len() {
        return true;
    }
    current.iter().zip(fresh).any(|(shown, new)| {
        shown.id != new.id
            || shown.stock_quantity != new.stock_quantity
            || shown.price != new.price
            || shown.status != new.status
    })
}

/// Whether a refreshed product differs from the one on screen.
///
/// Compares stock, price, status and view count. Nothing shown yet counts as
/// a change.
#[must_use]
pub fn product_changed(current: Option<&Product>, fresh: &Product) -> bool {
    current.is_none_or(|shown| {
        shown.stock_quantity != fresh.stock_quantity
            || shown.price != fresh.price
            || shown.status != fresh.status
            || shown.views_count != fresh.views_count
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use shopfront_core::{ProductId, ProductStatus, UserId};
    use uuid::Uuid;

    use super::*;

    fn product(id: i32) -> Product {
        Product {
            id: ProductId::new(id),
            uuid: Uuid::new_v4(),
            seller_id: UserId::new(1),
            name: format!("Producto {id}"),
            description: String::new(),
            price: Decimal::new(1999, 2),
            stock_quantity: 5,
            category: "hogar".to_string(),
            images: Vec::new(),
            status: ProductStatus::Active,
            views_count: 0,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_identical_listing_unchanged() {
        let shown = vec![product(1), product(2)];
        assert!(!listing_changed(&shown, &shown.clone()));
    }

    #[test]
    fn test_length_change_detected() {
        let shown = vec![product(1), product(2)];
        assert!(listing_changed(&shown, &shown[..1]));
        assert!(listing_changed(&[], &shown));
    }

    #[test]
    fn test_tracked_fields_detected() {
        let shown = vec![product(1), product(2)];

        let mut fresh = shown.clone();
        fresh[1].stock_quantity = 0;
        assert!(listing_changed(&shown, &fresh));

        let mut fresh = shown.clone();
        fresh[0].price = Decimal::new(2499, 2);
        assert!(listing_changed(&shown, &fresh));

        let mut fresh = shown.clone();
        fresh[0].status = ProductStatus::Inactive;
        assert!(listing_changed(&shown, &fresh));

        let fresh = vec![product(2), product(1)];
        assert!(listing_changed(&shown, &fresh));
    }

    #[test]
    fn test_name_and_description_edits_not_detected() {
        let shown = vec![product(1)];
        let mut fresh = shown.clone();
        fresh[0].name = "Nombre nuevo".to_string();
        fresh[0].description = "Otra descripción".to_string();
        assert!(!listing_changed(&shown, &fresh));
    }

    #[test]
    fn test_product_changed() {
        let shown = product(1);
        assert!(product_changed(None, &shown));
        assert!(!product_changed(Some(&shown), &shown));

        let mut fresh = shown.clone();
        fresh.views_count += 1;
        assert!(product_changed(Some(&shown), &fresh));

        let mut fresh = shown.clone();
        fresh.name = "Otro".to_string();
        assert!(!product_changed(Some(&shown), &fresh));
    }
}
