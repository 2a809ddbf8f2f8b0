//! Service configuration, read from the environment (and `.env` via dotenvy).

use crate::domain::aggregates::{ResolverConfig, ZeroBasePolicy};
use crate::{PricingError, Result};

pub const DEFAULT_PORT: u16 = 8083;

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    pub resolver: ResolverConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| PricingError::InvalidConfig { key: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };

        let mut resolver = ResolverConfig::default();
        if let Some(label) = lookup("PRICING_CURRENCY_LABEL") {
            resolver.currency_label = label;
        }
        if let Some(raw) = lookup("PRICING_ZERO_BASE") {
            resolver.zero_base = raw.parse::<ZeroBasePolicy>()?;
        }
        if let Some(raw) = lookup("PRICING_FLOOR_AT_ZERO") {
            resolver.floor_at_zero = parse_bool(&raw)
                .ok_or(PricingError::InvalidConfig { key: "PRICING_FLOOR_AT_ZERO", value: raw })?;
        }

        Ok(Self { port, resolver })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
