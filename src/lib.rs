//! OpenSASE Pricing
//!
//! Display-price resolution shared by every storefront surface.
//!
//! ## Features
//! - Loose JSON product records (numbers, numeric strings, nulls)
//! - Variant fallback and discount application
//! - Currency formatting and strikethrough/badge decisions
//! - Listing sort and price-range filtering
//! - HTTP endpoints for rendering clients

pub mod api;
pub mod config;
pub mod domain;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use domain::aggregates::{
    apply_discount, format_price, resolve_display_price, should_show_original_price, PriceResolver,
    PriceView, ProductListing, ResolverConfig, SortOrder, ZeroBasePolicy,
};
pub use domain::value_objects::{to_number, DiscountKind, PriceRange};

// =============================================================================
// Core Types
// =============================================================================

/// A product record as the backend serves it. Every price field keeps its raw
/// JSON so mixed number/string typing survives until coercion.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPriceInput {
    #[serde(default)]
    pub base_price: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub original_price: Option<Value>,
    #[serde(default)]
    pub discount: Option<Value>,
    #[serde(default)]
    pub discount_type: Option<Value>,
    #[serde(default, deserialize_with = "lenient_variants")]
    pub variants: Vec<VariantPriceInput>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantPriceInput {
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub original_price: Option<Value>,
    #[serde(default)]
    pub base_price: Option<Value>,
    #[serde(default)]
    pub discount: Option<Value>,
    #[serde(default)]
    pub discount_type: Option<Value>,
    #[serde(default)]
    pub calculated_price: Option<Value>,
}

impl ProductPriceInput {
    /// Builds a record from arbitrary JSON. Anything that is not an object
    /// yields an empty record, which resolves to a price of zero.
    pub fn from_value(value: Value) -> Self {
        from_object(value)
    }
}

// A non-array `variants` field, or a non-object entry, must not sink the
// whole product record.
fn lenient_variants<'de, D>(deserializer: D) -> std::result::Result<Vec<VariantPriceInput>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(from_object)
            .collect(),
        _ => Vec::new(),
    })
}

// Structs also deserialize from JSON arrays positionally; only objects count.
fn from_object<T: Default + serde::de::DeserializeOwned>(value: Value) -> T {
    match value {
        Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
        _ => T::default(),
    }
}

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum PricingError {
    #[error("Invalid value {value:?} for {key}")]
    InvalidConfig { key: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, PricingError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_from_backend_json() {
        let p: ProductPriceInput = serde_json::from_value(json!({
            "basePrice": "1000",
            "discount": 10,
            "discountType": "PERCENTAGE",
            "name": "ignored",
            "variants": [{ "price": 500, "calculatedPrice": 450 }]
        }))
        .unwrap();
        assert_eq!(p.base_price, Some(json!("1000")));
        assert_eq!(p.variants.len(), 1);
        assert_eq!(p.variants[0].calculated_price, Some(json!(450)));
    }

    #[test]
    fn test_null_fields_are_absent() {
        let p: ProductPriceInput = serde_json::from_value(json!({ "basePrice": null, "variants": null })).unwrap();
        assert_eq!(p.base_price, None);
        assert!(p.variants.is_empty());
    }

    #[test]
    fn test_malformed_variants_tolerated() {
        let p: ProductPriceInput = serde_json::from_value(json!({ "variants": { "price": 1 } })).unwrap();
        assert!(p.variants.is_empty());
        let p: ProductPriceInput = serde_json::from_value(json!({ "variants": [null, 7, { "price": 3 }] })).unwrap();
        assert_eq!(p.variants.len(), 3);
        assert_eq!(p.variants[0], VariantPriceInput::default());
        assert_eq!(p.variants[2].price, Some(json!(3)));
    }

    #[test]
    fn test_from_value_non_object() {
        assert_eq!(ProductPriceInput::from_value(json!([1, 2])), ProductPriceInput::default());
        assert_eq!(ProductPriceInput::from_value(json!("x")), ProductPriceInput::default());
    }
}
