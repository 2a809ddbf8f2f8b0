//! Pricing domain
pub mod aggregates;
pub mod value_objects;
