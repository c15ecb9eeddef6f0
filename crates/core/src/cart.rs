//! Cart reconciliation.
//!
//! The backend stores a cart as bare `(productId, qty)` pairs. To show it,
//! each pair is joined against the product catalog to pick up the name,
//! cost, rating and image.
//!
//! Entries that reference a product missing from the catalog are skipped.
//! A stale or partial catalog is tolerated rather than treated as fatal.

use crate::types::{CartEntry, CartLineItem, Price, Product, ProductId};

/// Join cart entries against the catalog into priced line items.
///
/// - `None` or an empty slice yields an empty cart.
/// - Output order follows `entries`, not the catalog.
/// - Entries whose product is not in `catalog` are omitted.
/// - When the catalog lists an ID twice, the first product wins.
///
/// # Example
///
/// ```rust
/// # use std::num::NonZeroU32;
/// # use qkart_core::{CartEntry, Price, Product, ProductId, Rating, reconcile};
/// let catalog = vec![Product {
///     id: ProductId::new("A"),
///     name: "iPhone XR".into(),
///     category: "Phones".into(),
///     cost: Price::from(100),
///     rating: Rating::new(4).unwrap(),
///     image_url: "https://i.imgur.com/lulqWzW.jpg".into(),
/// }];
/// let entries = vec![
///     CartEntry::new("A", NonZeroU32::new(3).unwrap()),
///     CartEntry::new("Z", NonZeroU32::new(1).unwrap()),
/// ];
///
/// let items = reconcile(Some(entries.as_slice()), &catalog);
/// assert_eq!(items.len(), 1);
/// assert_eq!(items[0].quantity.get(), 3);
/// ```
#[must_use]
pub fn reconcile(entries: Option<&[CartEntry]>, catalog: &[Product]) -> Vec<CartLineItem> {
    let Some(entries) = entries else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            catalog
                .iter()
                .find(|product| product.id == entry.product_id)
                .map(|product| CartLineItem::from_product(product, entry.quantity))
        })
        .collect()
}

/// Whether a product is already in the cart.
#[must_use]
pub fn contains_product(items: &[CartLineItem], product_id: &ProductId) -> bool {
    items.iter().any(|item| item.product_id == *product_id)
}

/// Total cost of the cart.
#[must_use]
pub fn cart_total(items: &[CartLineItem]) -> Price {
    items.iter().map(CartLineItem::line_total).sum()
}

/// Total number of units in the cart.
#[must_use]
pub fn total_quantity(items: &[CartLineItem]) -> u64 {
    items.iter().map(|item| u64::from(item.quantity.get())).sum()
}
