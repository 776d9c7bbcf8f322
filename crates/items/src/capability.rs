//! Capabilities: the orthogonal properties an item can carry.
//!
//! Every capability has a [`CapabilityKind`]. Capabilities of different
//! kinds are ordered by the kind's qualified name; capabilities of the same
//! kind by their own fields. Equality and hashing follow the same fields as
//! the ordering, so `a == b` exactly when `a.cmp(&b)` is `Equal`.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use satchel_core::{DomainError, DomainResult, ValueObject};

/// Tag naming the concrete type of a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityKind {
    CarryWeight,
    Merchandise,
    Stackable,
}

impl CapabilityKind {
    pub const ALL: [CapabilityKind; 3] = [
        CapabilityKind::CarryWeight,
        CapabilityKind::Merchandise,
        CapabilityKind::Stackable,
    ];

    /// Fully-qualified kind name, the primary key when ordering capabilities
    /// of different kinds.
    pub fn qualified_name(self) -> &'static str {
        match self {
            CapabilityKind::CarryWeight => "satchel.capability.CarryWeight",
            CapabilityKind::Merchandise => "satchel.capability.Merchandise",
            CapabilityKind::Stackable => "satchel.capability.Stackable",
        }
    }
}

impl PartialOrd for CapabilityKind {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CapabilityKind {
    fn cmp(&self, other: &Self) -> Ordering {
        self.qualified_name()
            .as_bytes()
            .cmp(other.qualified_name().as_bytes())
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.qualified_name())
    }
}

/// How much an item weighs when carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CarryWeight {
    pub weight: u32,
}

impl CarryWeight {
    pub fn new(weight: u32) -> Self {
        Self { weight }
    }
}

/// Buy price and resale worth.
///
/// Ordered, compared and hashed by `price + worth`: two offers with the same
/// total are the same capability.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "MerchandiseRecord")]
pub struct Merchandise {
    price: u32,
    worth: u32,
}

#[derive(Deserialize)]
struct MerchandiseRecord {
    price: u32,
    #[serde(default)]
    worth: Option<u32>,
}

impl From<MerchandiseRecord> for Merchandise {
    fn from(record: MerchandiseRecord) -> Self {
        match record.worth {
            Some(worth) => Self::with_resale(record.price, worth),
            None => Self::new(record.price),
        }
    }
}

impl Merchandise {
    /// Sells back for what it costs.
    pub fn new(price: u32) -> Self {
        Self {
            price,
            worth: price,
        }
    }

    /// Sells back for a different amount than it costs.
    pub fn with_resale(price: u32, worth: u32) -> Self {
        Self { price, worth }
    }

    pub fn price(&self) -> u32 {
        self.price
    }

    pub fn worth(&self) -> u32 {
        self.worth
    }

    pub fn has_different_resale(&self) -> bool {
        self.price != self.worth
    }

    fn total(&self) -> u64 {
        u64::from(self.price) + u64::from(self.worth)
    }
}

impl PartialEq for Merchandise {
    fn eq(&self, other: &Self) -> bool {
        self.total() == other.total()
    }
}

impl Eq for Merchandise {}

impl Hash for Merchandise {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.total().hash(state);
    }
}

impl PartialOrd for Merchandise {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Merchandise {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total().cmp(&other.total())
    }
}

/// Several copies can share one slot, up to `stack_limit`.
///
/// Larger stack limits sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "StackableRecord")]
pub struct Stackable {
    stack_limit: u32,
}

#[derive(Deserialize)]
struct StackableRecord {
    stack_limit: u32,
}

impl TryFrom<StackableRecord> for Stackable {
    type Error = DomainError;

    fn try_from(record: StackableRecord) -> Result<Self, Self::Error> {
        Stackable::new(record.stack_limit)
    }
}

impl Stackable {
    pub const MIN_LIMIT: u32 = 2;

    pub fn new(stack_limit: u32) -> DomainResult<Self> {
        if stack_limit < Self::MIN_LIMIT {
            return Err(DomainError::validation(format!(
                "stack limit must be at least {}, got {stack_limit}",
                Self::MIN_LIMIT
            )));
        }
        Ok(Self { stack_limit })
    }

    pub fn stack_limit(&self) -> u32 {
        self.stack_limit
    }
}

impl PartialOrd for Stackable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Stackable {
    fn cmp(&self, other: &Self) -> Ordering {
        other.stack_limit.cmp(&self.stack_limit)
    }
}

/// A capability instance of any kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Capability {
    CarryWeight(CarryWeight),
    Merchandise(Merchandise),
    Stackable(Stackable),
}

impl Capability {
    pub fn kind(&self) -> CapabilityKind {
        match self {
            Capability::CarryWeight(_) => CapabilityKind::CarryWeight,
            Capability::Merchandise(_) => CapabilityKind::Merchandise,
            Capability::Stackable(_) => CapabilityKind::Stackable,
        }
    }

    /// A fresh, independent copy of this capability, used whenever a catalog
    /// template is attached to an item.
    pub fn instantiate(&self) -> Capability {
        self.clone()
    }

    fn cmp_same_kind(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Capability::CarryWeight(a), Capability::CarryWeight(b)) => a.cmp(b),
            (Capability::Merchandise(a), Capability::Merchandise(b)) => a.cmp(b),
            (Capability::Stackable(a), Capability::Stackable(b)) => a.cmp(b),
            // Different kinds never reach here; `cmp` orders them by kind first.
            _ => Ordering::Equal,
        }
    }
}

impl PartialEq for Capability {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Capability {}

impl PartialOrd for Capability {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Capability {
    fn cmp(&self, other: &Self) -> Ordering {
        if std::ptr::eq(self, other) {
            return Ordering::Equal;
        }
        self.kind()
            .cmp(&other.kind())
            .then_with(|| self.cmp_same_kind(other))
    }
}

impl Hash for Capability {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        match self {
            Capability::CarryWeight(c) => c.hash(state),
            Capability::Merchandise(c) => c.hash(state),
            Capability::Stackable(c) => c.hash(state),
        }
    }
}

impl ValueObject for Capability {}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::CarryWeight(c) => write!(f, "weight {}", c.weight),
            Capability::Merchandise(c) if c.has_different_resale() => {
                write!(f, "price {} (resale {})", c.price, c.worth)
            }
            Capability::Merchandise(c) => write!(f, "price {}", c.price),
            Capability::Stackable(c) => write!(f, "stacks to {}", c.stack_limit),
        }
    }
}

/// A group of capability kinds that can be queried together.
///
/// Each concrete capability type is a family containing only itself.
pub trait CapabilityFamily {
    fn admits(kind: CapabilityKind) -> bool;
}

/// A concrete capability type that can be looked up by exact kind.
pub trait CapabilityType: CapabilityFamily + Clone + Into<Capability> {
    const KIND: CapabilityKind;

    fn from_capability(capability: &Capability) -> Option<&Self>;
}

macro_rules! capability_type {
    ($t:ident) => {
        impl CapabilityType for $t {
            const KIND: CapabilityKind = CapabilityKind::$t;

            fn from_capability(capability: &Capability) -> Option<&Self> {
                match capability {
                    Capability::$t(inner) => Some(inner),
                    _ => None,
                }
            }
        }

        impl CapabilityFamily for $t {
            fn admits(kind: CapabilityKind) -> bool {
                kind == CapabilityKind::$t
            }
        }

        impl From<$t> for Capability {
            fn from(value: $t) -> Self {
                Capability::$t(value)
            }
        }
    };
}

capability_type!(CarryWeight);
capability_type!(Merchandise);
capability_type!(Stackable);

/// Capabilities describing the physical handling of an item.
pub struct Physical;

impl CapabilityFamily for Physical {
    fn admits(kind: CapabilityKind) -> bool {
        matches!(kind, CapabilityKind::CarryWeight | CapabilityKind::Stackable)
    }
}

/// Capabilities describing trade value.
pub struct Tradeable;

impl CapabilityFamily for Tradeable {
    fn admits(kind: CapabilityKind) -> bool {
        matches!(kind, CapabilityKind::Merchandise)
    }
}

/// Every capability kind.
pub struct AnyCapability;

impl CapabilityFamily for AnyCapability {
    fn admits(_: CapabilityKind) -> bool {
        true
    }
}
