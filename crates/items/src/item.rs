//! Items: typed, named values carrying a property bag.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use satchel_core::ValueObject;

use crate::bag::PropertyBag;
use crate::capability::Capability;
use crate::effect::EffectTarget;
use crate::taxonomy::TypeNode;

/// An item identity.
///
/// Immutable once built. Two items are the same identity exactly when type,
/// name and attached capabilities are all equal; the ordering compares the
/// same three parts in that order.
#[derive(Debug, Clone)]
pub struct Item {
    item_type: TypeNode,
    name: String,
    properties: PropertyBag,
}

impl Item {
    pub fn new(item_type: TypeNode, name: impl Into<String>, properties: PropertyBag) -> Self {
        Self {
            item_type,
            name: name.into(),
            properties,
        }
    }

    /// An item with no capabilities.
    pub fn plain(item_type: TypeNode, name: impl Into<String>) -> Self {
        Self::new(item_type, name, PropertyBag::new())
    }

    /// Instantiate a catalog template. Every capability is copied into a
    /// fresh bag owned by the new item.
    pub fn from_template(template: &ItemTemplate) -> Self {
        Self::new(
            template.item_type.clone(),
            template.name.clone(),
            PropertyBag::new().with_all(&template.properties),
        )
    }

    pub fn item_type(&self) -> &TypeNode {
        &self.item_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &PropertyBag {
        &self.properties
    }

    /// Apply this item's capabilities to `target`.
    pub fn affect<T: EffectTarget>(&self, target: &mut T) {
        self.properties.affect(self, target);
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Self) -> bool {
        self.item_type == other.item_type
            && self.name == other.name
            && self.properties == other.properties
    }
}

impl Eq for Item {}

impl Hash for Item {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.item_type.hash(state);
        self.name.hash(state);
        self.properties.hash(state);
    }
}

impl PartialOrd for Item {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Item {
    fn cmp(&self, other: &Self) -> Ordering {
        self.item_type
            .cmp(&other.item_type)
            .then_with(|| self.name.as_bytes().cmp(other.name.as_bytes()))
            .then_with(|| self.properties.cmp(&other.properties))
    }
}

impl ValueObject for Item {}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.item_type)
    }
}

/// A catalog record describing how to build an item.
///
/// Templates keep the raw capability list as written in the catalog,
/// duplicates included; duplicates are resolved (first wins) each time an
/// item is instantiated.
#[derive(Debug, Clone)]
pub struct ItemTemplate {
    item_type: TypeNode,
    name: String,
    description: String,
    properties: Vec<Capability>,
}

impl ItemTemplate {
    pub fn new(item_type: TypeNode, name: impl Into<String>) -> Self {
        Self {
            item_type,
            name: name.into(),
            description: String::new(),
            properties: Vec::new(),
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with(mut self, capability: impl Into<Capability>) -> Self {
        self.properties.push(capability.into());
        self
    }

    pub fn item_type(&self) -> &TypeNode {
        &self.item_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn properties(&self) -> &[Capability] {
        &self.properties
    }

    pub fn instantiate(&self) -> Item {
        Item::from_template(self)
    }
}
