//! `autoshop-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the catalog, sales and
//! identity crates (no IO beyond the persistence error type).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult, PersistenceError};
pub use id::{OrderId, ProductCode, UserId};
pub use value_object::ValueObject;
