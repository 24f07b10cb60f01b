//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined entirely
//! by their attribute values. Two value objects with the same values are considered equal.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. Order lines are the
/// canonical example here: a line snapshots a product code, a quantity and the unit
/// price at purchase time, and later catalog edits never reach back into it.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: No identity (two order lines with same values are equal)
/// - **Entity**: Has identity (two products with the same code are the same product)
///
/// The trait requires:
/// - **Clone**: value objects are copied, never shared by reference
/// - **PartialEq**: value objects are compared by their attribute values
/// - **Debug**: value objects should be debuggable (helpful for logging, testing)
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
