//! Aggregates module
pub mod listing;
pub mod product;

pub use listing::{ListedProduct, ProductListing, SortOrder};
pub use product::{
    apply_discount, format_price, resolve_display_price, should_show_original_price, PriceResolver, PriceView,
    ResolverConfig, ZeroBasePolicy,
};
