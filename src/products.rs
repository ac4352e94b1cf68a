//! Product Model - Storefront Wire Shapes
//!
//! Transient copies of catalog rows fetched per page view. The catalog store
//! owns the data; nothing here persists.

use serde::{Deserialize, Serialize};

use crate::variants::{License, VariantTag};

/// Opaque store identifier for a product.
pub type ProductId = String;

/// One purchasable licensed rendition of a product image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    #[serde(rename = "type")]
    pub kind: VariantTag,
    pub license: License,
    pub price: f64,
}

impl ProductVariant {
    /// Price as card copy, e.g. "$24.00".
    pub fn price_display(&self) -> String {
        format!("${:.2}", self.price)
    }
}

/// A catalog product with its ordered variant list.
///
/// Variant order is display order and is preserved as fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    // The store API is document-backed and answers with "_id".
    #[serde(alias = "_id")]
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub image_url: String,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variants::VariantKind;

    #[test]
    fn test_product_decodes_store_shape() {
        let json = r#"{
            "_id": "66f0a",
            "name": "Harbor Mist",
            "description": "Fog over the quay",
            "imageUrl": "/images/harbor.jpg",
            "variants": [
                {"type": "SQUARE", "license": "personal", "price": 9.99},
                {"type": "WIDE", "license": "commercial", "price": 24}
            ]
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, "66f0a");
        assert_eq!(product.image_url, "/images/harbor.jpg");
        assert_eq!(product.variants.len(), 2);
        assert_eq!(product.variants[0].kind.kind(), Some(VariantKind::Square));
        assert_eq!(product.variants[1].license, License::Commercial);
    }

    #[test]
    fn test_variants_default_to_empty() {
        let json = r#"{"id": "p-1", "name": "Bare", "description": "", "imageUrl": "/i.jpg"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.variants.is_empty());
    }

    #[test]
    fn test_price_display_two_decimals() {
        let variant = ProductVariant {
            kind: VariantKind::Wide.into(),
            license: License::Commercial,
            price: 24.0,
        };
        assert_eq!(variant.price_display(), "$24.00");
    }
}
