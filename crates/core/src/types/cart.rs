//! Cart records: the server-side wire form and the derived display form.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use super::{Price, Product, ProductId, Rating};

/// One product in the user's server-side cart.
///
/// Wire form as returned by `GET /cart` and `POST /cart`:
///
/// ```json
/// { "productId": "KCRwjF7lN97HnEaY", "qty": 3 }
/// ```
///
/// A zero quantity is not a valid cart entry and fails decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    /// Product in the cart.
    pub product_id: ProductId,
    /// How many of the product are in the cart.
    #[serde(rename = "qty", alias = "quantity")]
    pub quantity: NonZeroU32,
}

impl CartEntry {
    /// Create a cart entry.
    #[must_use]
    pub fn new(product_id: impl Into<ProductId>, quantity: NonZeroU32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Request body for `POST /cart`.
///
/// Sets the quantity of a product in the cart. A quantity of zero removes
/// the product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartUpdate {
    /// Product to add, update or remove.
    pub product_id: ProductId,
    /// Desired quantity.
    pub qty: u32,
}

/// A cart entry enriched with catalog data for display.
///
/// Line items are a transient projection: they are rebuilt by
/// [`reconcile`](crate::cart::reconcile) whenever the cart or the catalog
/// changes and are never sent back to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Product in the cart.
    pub product_id: ProductId,
    /// Display name.
    pub name: String,
    /// Category the product belongs to.
    pub category: String,
    /// Unit cost.
    pub cost: Price,
    /// Aggregate rating out of five.
    pub rating: Rating,
    /// Product image URL.
    pub image_url: String,
    /// How many of the product are in the cart.
    pub quantity: NonZeroU32,
}

impl CartLineItem {
    /// Combine a catalog product with a cart quantity.
    #[must_use]
    pub fn from_product(product: &Product, quantity: NonZeroU32) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            cost: product.cost,
            rating: product.rating,
            image_url: product.image_url.clone(),
            quantity,
        }
    }

    /// Cost of this line (unit cost times quantity).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.cost.times(self.quantity)
    }
}
