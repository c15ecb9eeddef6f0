//! Catalog product record.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId, Rating};

/// A purchasable product from the backend catalog.
///
/// The backend names the identifier `_id` and the image URL `image`:
///
/// ```json
/// {
///     "name": "iPhone XR",
///     "category": "Phones",
///     "cost": 100,
///     "rating": 4,
///     "image": "https://i.imgur.com/lulqWzW.jpg",
///     "_id": "v4sLtEcMpzabRyfx"
/// }
/// ```
///
/// `id` and `imageUrl` are accepted as aliases. Serialization uses the
/// backend's field names so a decoded record round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Backend-assigned product ID.
    #[serde(rename = "_id", alias = "id")]
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Category the product belongs to.
    pub category: String,
    /// Unit cost.
    pub cost: Price,
    /// Aggregate rating out of five.
    pub rating: Rating,
    /// Product image URL.
    #[serde(rename = "image", alias = "imageUrl")]
    pub image_url: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_backend_shape() {
        let json = r#"{
            "name": "iPhone XR",
            "category": "Phones",
            "cost": 100,
            "rating": 4,
            "image": "https://i.imgur.com/lulqWzW.jpg",
            "_id": "v4sLtEcMpzabRyfx"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, "v4sLtEcMpzabRyfx");
        assert_eq!(product.name, "iPhone XR");
        assert_eq!(product.category, "Phones");
        assert_eq!(product.cost, Price::from(100));
        assert_eq!(product.rating.stars(), 4);
        assert_eq!(product.image_url, "https://i.imgur.com/lulqWzW.jpg");
    }

    #[test]
    fn test_decode_accepts_aliases() {
        let json = r#"{
            "id": "A",
            "name": "Basketball",
            "category": "Sports",
            "cost": 100,
            "rating": 5,
            "imageUrl": "https://example.com/ball.jpg"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, "A");
        assert_eq!(product.image_url, "https://example.com/ball.jpg");
    }

    #[test]
    fn test_decode_rejects_missing_fields() {
        let json = r#"{"_id": "A", "name": "Basketball"}"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }

    #[test]
    fn test_decode_rejects_bad_rating() {
        let json = r#"{
            "_id": "A",
            "name": "Basketball",
            "category": "Sports",
            "cost": 100,
            "rating": 7,
            "image": "x"
        }"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }
}
