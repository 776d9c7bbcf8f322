//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined entirely
//! by their attribute values. Two value objects with the same values are considered equal.

/// Marker trait for value objects.
///
/// Items, capabilities and type nodes are all value objects: an item is the
/// same trackable identity as another item exactly when its type, name and
/// capabilities compare equal, no matter where either value was built.
///
/// ## Ordering
///
/// Value objects used as ledger keys also carry a total order (`Ord`). The
/// order must agree with equality: `a.cmp(&b) == Equal` iff `a == b`, and the
/// `Hash` impl must hash exactly the data the order looks at.
///
/// ## Immutability
///
/// Value objects are **immutable** once built. To "modify" one, build a new
/// one. Keys stored in hash maps and ordered maps therefore never move.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// struct CarryWeight {
///     weight: u32,
/// }
///
/// impl ValueObject for CarryWeight {}
/// ```
pub trait ValueObject: Clone + Eq + Ord + core::hash::Hash + core::fmt::Debug {}
