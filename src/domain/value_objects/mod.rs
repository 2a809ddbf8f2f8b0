//! Value Objects for storefront pricing

pub mod coerce;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub use coerce::to_number;

/// How a discount magnitude is applied. `FLAT` and `FIXED` are synonyms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountKind {
    Percentage,
    Flat,
}

impl DiscountKind {
    /// Case-sensitive match on the raw field. Unknown values and non-strings
    /// mean "no discount".
    pub fn parse(value: Option<&Value>) -> Option<Self> {
        match value? {
            Value::String(s) => match s.as_str() {
                "PERCENTAGE" => Some(Self::Percentage),
                "FLAT" | "FIXED" => Some(Self::Flat),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn apply(self, base: f64, amount: f64) -> f64 {
        match self {
            Self::Percentage => base * (1.0 - amount / 100.0),
            Self::Flat => base - amount,
        }
    }
}

/// Inclusive display-price bounds; an open side accepts everything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PriceRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self { Self { min, max } }
    pub fn is_open(&self) -> bool { self.min.is_none() && self.max.is_none() }
    pub fn contains(&self, price: f64) -> bool {
        self.min.map_or(true, |min| price >= min) && self.max.map_or(true, |max| price <= max)
    }
}

/// Money value object: an amount rendered with a currency label, e.g.
/// `Rs. 1500` or `Rs. 1500.50`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Money { amount: f64, label: String }

impl Money {
    pub fn new(amount: f64, label: &str) -> Self { Self { amount, label: label.to_string() } }
    pub fn rupees(amount: f64) -> Self { Self::new(amount, "Rs.") }
    pub fn amount(&self) -> f64 { self.amount }
    pub fn label(&self) -> &str { &self.label }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label, format_amount(self.amount))
    }
}

/// Whole amounts print without decimals, everything else with exactly two.
/// Half-way cases round away from zero.
pub fn format_amount(amount: f64) -> String {
    if amount.is_nan() {
        return "NaN".to_string();
    }
    if amount.is_infinite() {
        return if amount > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if amount == 0.0 {
        return "0".to_string();
    }
    if amount % 1.0 == 0.0 {
        return format!("{amount:.0}");
    }
    match Decimal::from_f64_retain(amount) {
        Some(exact) => {
            let mut rounded = exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(2);
            rounded.to_string()
        }
        None => format!("{amount:.2}"),
    }
}
