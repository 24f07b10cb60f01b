//! Catalog domain module.
//!
//! This crate contains business rules for products and the catalog that owns them,
//! implemented purely as deterministic domain logic (no IO, no storage).

pub mod catalog;
pub mod product;

pub use catalog::Catalog;
pub use product::{
    ComplexityTier, DiscountSchedule, MAX_UNIT_PRICE, PartDetails, Product, ProductDetails,
    ProductKind, ServiceDetails,
};
