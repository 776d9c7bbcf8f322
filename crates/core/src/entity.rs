//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// A ledger is an entity: its contents change on every operation, but its
/// identifier stays the same for its whole life.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
