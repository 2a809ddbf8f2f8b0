//! Product price resolution
//!
//! One pricing policy for every rendering surface: a product record goes in,
//! a display price, its formatted string and the strikethrough/badge
//! decisions come out. Nothing here returns an error; malformed fields
//! degrade to `0` or to "no discount".

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::domain::value_objects::coerce::{is_nullish, is_truthy, js_number_opt, loose_number, present, to_number};
use crate::domain::value_objects::{format_amount, DiscountKind, Money};
use crate::{PricingError, ProductPriceInput, VariantPriceInput};

/// What a product-level base price of `0` means.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroBasePolicy {
    /// `0` is indistinguishable from "not set" and defers to the first variant.
    #[default]
    #[serde(rename = "unset")]
    TreatAsUnset,
    /// Only a missing or null base price defers to variants.
    #[serde(rename = "free")]
    TreatAsFree,
}

impl FromStr for ZeroBasePolicy {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unset" => Ok(Self::TreatAsUnset),
            "free" => Ok(Self::TreatAsFree),
            _ => Err(PricingError::InvalidConfig { key: "PRICING_ZERO_BASE", value: s.to_string() }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    pub zero_base: ZeroBasePolicy,
    /// Clamp discounted prices at zero instead of letting them go negative.
    pub floor_at_zero: bool,
    pub currency_label: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self { zero_base: ZeroBasePolicy::TreatAsUnset, floor_at_zero: false, currency_label: "Rs.".to_string() }
    }
}

/// Everything a card, listing row or store page needs to render a price.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceView {
    pub display_price: f64,
    pub formatted: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<String>,
    pub show_discount_badge: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_label: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct PriceResolver {
    config: ResolverConfig,
}

impl PriceResolver {
    pub fn new(config: ResolverConfig) -> Self { Self { config } }
    pub fn config(&self) -> &ResolverConfig { &self.config }

    pub fn apply_discount(&self, base: f64, discount: Option<&Value>, discount_type: Option<&Value>) -> f64 {
        if !is_truthy(discount) || is_nullish(discount_type) {
            return base;
        }
        let amount = loose_number(discount);
        if !amount.is_finite() {
            return base;
        }
        match DiscountKind::parse(discount_type) {
            Some(kind) => {
                let price = kind.apply(base, amount);
                if self.config.floor_at_zero { price.max(0.0) } else { price }
            }
            None => base,
        }
    }

    pub fn resolve_display_price(&self, product: &ProductPriceInput) -> f64 {
        let base = present(&product.base_price);
        let product_price = to_number(base);
        let base_unset = match self.config.zero_base {
            ZeroBasePolicy::TreatAsUnset => base.is_none() || product_price == 0.0,
            ZeroBasePolicy::TreatAsFree => base.is_none(),
        };

        let price = match product.variants.first() {
            Some(first) if base_unset => self.resolve_variant_price(product, first),
            _ if has_discount(&product.discount, &product.discount_type) => {
                self.apply_discount(product_price, product.discount.as_ref(), product.discount_type.as_ref())
            }
            _ => product_price,
        };
        // Overflowing arithmetic on extreme inputs must not leak Infinity/NaN.
        if price.is_finite() { price } else { 0.0 }
    }

    // Only the first variant is ever consulted.
    fn resolve_variant_price(&self, product: &ProductPriceInput, first: &VariantPriceInput) -> f64 {
        if let Some(calculated) = first.calculated_price.as_ref().and_then(Value::as_f64).filter(|p| p.is_finite()) {
            return calculated;
        }

        let variant_base = present(&first.price)
            .or_else(|| present(&first.original_price))
            .or_else(|| present(&first.base_price))
            .or_else(|| present(&product.base_price))
            .or_else(|| present(&product.price));
        let base = to_number(variant_base);

        if has_discount(&first.discount, &first.discount_type) {
            self.apply_discount(base, first.discount.as_ref(), first.discount_type.as_ref())
        } else if has_discount(&product.discount, &product.discount_type) {
            self.apply_discount(base, product.discount.as_ref(), product.discount_type.as_ref())
        } else {
            base
        }
    }

    pub fn format_price(&self, value: f64) -> String {
        Money::new(value, &self.config.currency_label).to_string()
    }

    /// Compared against the already-discounted display price, not the
    /// pre-discount base.
    pub fn should_show_original_price(&self, product: &ProductPriceInput, display_price: f64) -> bool {
        is_truthy(product.original_price.as_ref())
            && is_truthy(product.discount.as_ref())
            && js_number_opt(product.discount.as_ref()) > 0.0
            && to_number(product.original_price.as_ref()) != display_price
    }

    pub fn should_show_discount_badge(&self, product: &ProductPriceInput) -> bool {
        js_number_opt(product.discount.as_ref()) > 0.0
    }

    /// `10% off` or `Rs. 100 off`; `None` when no badge is shown or the
    /// discount type is unknown.
    pub fn discount_label(&self, product: &ProductPriceInput) -> Option<String> {
        if !self.should_show_discount_badge(product) {
            return None;
        }
        let amount = js_number_opt(product.discount.as_ref());
        match DiscountKind::parse(product.discount_type.as_ref())? {
            DiscountKind::Percentage => Some(format!("{}% off", format_amount(amount))),
            DiscountKind::Flat => Some(format!("{} off", self.format_price(amount))),
        }
    }

    pub fn view(&self, product: &ProductPriceInput) -> PriceView {
        let display_price = self.resolve_display_price(product);
        let original_price = self
            .should_show_original_price(product, display_price)
            .then(|| self.format_price(to_number(product.original_price.as_ref())));
        PriceView {
            display_price,
            formatted: self.format_price(display_price),
            original_price,
            show_discount_badge: self.should_show_discount_badge(product),
            discount_label: self.discount_label(product),
        }
    }
}

fn has_discount(discount: &Option<Value>, discount_type: &Option<Value>) -> bool {
    is_truthy(discount.as_ref()) && is_truthy(discount_type.as_ref())
}

// =============================================================================
// Default-policy entry points
// =============================================================================

pub fn apply_discount(base: f64, discount: Option<&Value>, discount_type: Option<&Value>) -> f64 {
    PriceResolver::default().apply_discount(base, discount, discount_type)
}

pub fn resolve_display_price(product: &ProductPriceInput) -> f64 {
    PriceResolver::default().resolve_display_price(product)
}

pub fn format_price(value: f64) -> String {
    PriceResolver::default().format_price(value)
}

pub fn should_show_original_price(product: &ProductPriceInput, display_price: f64) -> bool {
    PriceResolver::default().should_show_original_price(product, display_price)
}
