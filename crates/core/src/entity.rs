//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Products, users and orders are entities: two products with the same code are the
/// same product, whatever their stock level.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
