//! Type taxonomy: an immutable tree of categories and item types.
//!
//! Nodes are reference-counted and can only point at parents that already
//! exist, so a parent chain can never loop back on itself. A node's dotted
//! full name is computed once, when the node is built, and is the only key
//! used for equality, hashing and ordering.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use satchel_core::{DomainError, DomainResult, ValueObject};

/// Separator between segments of a full type name.
pub const SEPARATOR: char = '.';

/// Role of a node in the taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeNodeKind {
    /// Groups other nodes. Only categories can be parents.
    Category,
    /// A concrete type that items are instantiated with.
    ItemType,
}

struct NodeData {
    name: String,
    kind: TypeNodeKind,
    parent: Option<TypeNode>,
    full_name: String,
}

/// A node of the type taxonomy.
///
/// Cloning is cheap (shared handle). Two nodes are equal when their full
/// names are equal.
#[derive(Clone)]
pub struct TypeNode(Arc<NodeData>);

impl TypeNode {
    /// Build a category, optionally nested under `parent`.
    pub fn category(name: impl Into<String>, parent: Option<&TypeNode>) -> DomainResult<Self> {
        Self::build(name.into(), TypeNodeKind::Category, parent)
    }

    /// Build an item type, optionally nested under `parent`.
    pub fn item_type(name: impl Into<String>, parent: Option<&TypeNode>) -> DomainResult<Self> {
        Self::build(name.into(), TypeNodeKind::ItemType, parent)
    }

    fn build(name: String, kind: TypeNodeKind, parent: Option<&TypeNode>) -> DomainResult<Self> {
        validate_segment(&name)?;

        let full_name = match parent {
            Some(parent) if parent.kind() != TypeNodeKind::Category => {
                return Err(DomainError::invariant(format!(
                    "`{}` cannot be the parent of `{name}`: only categories can have children",
                    parent.full_name()
                )));
            }
            Some(parent) => format!("{}{SEPARATOR}{name}", parent.full_name()),
            None => name.clone(),
        };

        Ok(Self(Arc::new(NodeData {
            name,
            kind,
            parent: parent.cloned(),
            full_name,
        })))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn kind(&self) -> TypeNodeKind {
        self.0.kind
    }

    pub fn is_category(&self) -> bool {
        self.0.kind == TypeNodeKind::Category
    }

    pub fn parent(&self) -> Option<&TypeNode> {
        self.0.parent.as_ref()
    }

    /// Dot-joined names from the root down to this node.
    pub fn full_name(&self) -> &str {
        &self.0.full_name
    }

    /// This node followed by each of its ancestors, nearest first.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }

    /// True if `ancestor` is this node or any node on its parent chain.
    pub fn belongs_to(&self, ancestor: &TypeNode) -> bool {
        self.ancestors().any(|node| node == ancestor)
    }

    /// Number of ancestors above this node (roots have depth 0).
    pub fn depth(&self) -> usize {
        self.ancestors().count() - 1
    }

    pub fn same_node(&self, other: &TypeNode) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

fn validate_segment(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("type name cannot be empty"));
    }
    if name.contains(SEPARATOR) {
        return Err(DomainError::validation(format!(
            "type name `{name}` cannot contain `{SEPARATOR}`"
        )));
    }
    Ok(())
}

/// Iterator returned by [`TypeNode::ancestors`].
pub struct Ancestors<'a> {
    next: Option<&'a TypeNode>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a TypeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}

impl PartialEq for TypeNode {
    fn eq(&self, other: &Self) -> bool {
        self.same_node(other) || self.full_name() == other.full_name()
    }
}

impl Eq for TypeNode {}

impl std::hash::Hash for TypeNode {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.full_name().hash(state);
    }
}

impl PartialOrd for TypeNode {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeNode {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        if self.same_node(other) {
            return std::cmp::Ordering::Equal;
        }
        self.full_name().as_bytes().cmp(other.full_name().as_bytes())
    }
}

impl ValueObject for TypeNode {}

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.full_name())
    }
}

impl fmt::Debug for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeNode")
            .field("full_name", &self.full_name())
            .field("kind", &self.kind())
            .finish()
    }
}

/// A frozen set of type nodes, addressable by full name.
#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    nodes: BTreeMap<String, TypeNode>,
}

impl Taxonomy {
    pub fn builder() -> TaxonomyBuilder {
        TaxonomyBuilder::default()
    }

    pub fn get(&self, full_name: &str) -> Option<&TypeNode> {
        self.nodes.get(full_name)
    }

    /// Like [`Taxonomy::get`], but unknown names are an error.
    pub fn resolve(&self, full_name: &str) -> DomainResult<&TypeNode> {
        self.get(full_name)
            .ok_or_else(|| DomainError::unknown(format!("type `{full_name}`")))
    }

    /// All nodes, ordered by full name.
    pub fn iter(&self) -> impl Iterator<Item = &TypeNode> {
        self.nodes.values()
    }

    /// Direct children of `node`, ordered by full name.
    pub fn children_of<'a>(&'a self, node: &'a TypeNode) -> impl Iterator<Item = &'a TypeNode> {
        self.iter().filter(move |n| n.parent() == Some(node))
    }

    pub fn item_types(&self) -> impl Iterator<Item = &TypeNode> {
        self.iter().filter(|n| n.kind() == TypeNodeKind::ItemType)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Collects nodes in definition order; parents must be defined first.
#[derive(Debug, Default)]
pub struct TaxonomyBuilder {
    nodes: BTreeMap<String, TypeNode>,
}

impl TaxonomyBuilder {
    /// Define a node under an already-defined parent (given by full name).
    pub fn define(
        &mut self,
        name: &str,
        kind: TypeNodeKind,
        parent: Option<&str>,
    ) -> DomainResult<TypeNode> {
        let parent = match parent {
            Some(full_name) => Some(
                self.nodes
                    .get(full_name)
                    .ok_or_else(|| DomainError::unknown(format!("category `{full_name}`")))?,
            ),
            None => None,
        };

        let node = TypeNode::build(name.to_string(), kind, parent)?;
        if self.nodes.contains_key(node.full_name()) {
            return Err(DomainError::duplicate(format!("type `{}`", node.full_name())));
        }

        self.nodes.insert(node.full_name().to_string(), node.clone());
        Ok(node)
    }

    pub fn category(&mut self, name: &str, parent: Option<&str>) -> DomainResult<TypeNode> {
        self.define(name, TypeNodeKind::Category, parent)
    }

    pub fn item_type(&mut self, name: &str, parent: Option<&str>) -> DomainResult<TypeNode> {
        self.define(name, TypeNodeKind::ItemType, parent)
    }

    /// Freeze the taxonomy. No node can be added or changed afterwards.
    pub fn build(self) -> Taxonomy {
        Taxonomy { nodes: self.nodes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weapons() -> Taxonomy {
        let mut b = Taxonomy::builder();
        b.category("Weapon", None).unwrap();
        b.category("Melee", Some("Weapon")).unwrap();
        b.item_type("Sword", Some("Weapon.Melee")).unwrap();
        b.item_type("Axe", Some("Weapon")).unwrap();
        b.item_type("Sword", Some("Weapon")).unwrap();
        b.item_type("Potion", None).unwrap();
        b.build()
    }

    #[test]
    fn full_names_join_ancestors_root_first() {
        let t = weapons();
        let sword = t.get("Weapon.Melee.Sword").unwrap();
        assert_eq!(sword.name(), "Sword");
        assert_eq!(sword.depth(), 2);
        assert_eq!(
            sword.ancestors().map(TypeNode::name).collect::<Vec<_>>(),
            vec!["Sword", "Melee", "Weapon"]
        );
    }

    #[test]
    fn belongs_to_includes_self_and_ancestors_only() {
        let t = weapons();
        let sword = t.get("Weapon.Melee.Sword").unwrap();
        let melee = t.get("Weapon.Melee").unwrap();
        let weapon = t.get("Weapon").unwrap();
        let potion = t.get("Potion").unwrap();

        assert!(sword.belongs_to(sword));
        assert!(sword.belongs_to(melee));
        assert!(sword.belongs_to(weapon));
        assert!(!weapon.belongs_to(sword));
        assert!(!sword.belongs_to(potion));
    }

    #[test]
    fn ordering_is_ordinal_over_full_names() {
        let t = weapons();
        let axe = t.get("Weapon.Axe").unwrap();
        let sword = t.get("Weapon.Sword").unwrap();
        assert!(axe < sword);

        // Uppercase sorts before lowercase under byte ordering.
        let upper = TypeNode::item_type("Zed", None).unwrap();
        let lower = TypeNode::item_type("apple", None).unwrap();
        assert!(upper < lower);
    }

    #[test]
    fn equality_ignores_object_identity() {
        let a = TypeNode::category("Weapon", None).unwrap();
        let b = TypeNode::category("Weapon", None).unwrap();
        assert!(!a.same_node(&b));
        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), std::cmp::Ordering::Equal);
    }

    #[test]
    fn only_categories_can_parent() {
        let potion = TypeNode::item_type("Potion", None).unwrap();
        let err = TypeNode::item_type("Elixir", Some(&potion)).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn builder_rejects_bad_definitions() {
        let mut b = Taxonomy::builder();
        b.category("Weapon", None).unwrap();

        assert!(matches!(
            b.item_type("Sword", Some("Armor")),
            Err(DomainError::UnknownReference(_))
        ));
        assert!(matches!(
            b.category("Weapon", None),
            Err(DomainError::DuplicateDefinition(_))
        ));
        assert!(matches!(b.item_type("  ", None), Err(DomainError::Validation(_))));
        assert!(matches!(b.item_type("a.b", None), Err(DomainError::Validation(_))));
    }

    #[test]
    fn lookups_on_frozen_taxonomy() {
        let t = weapons();
        let weapon = t.get("Weapon").unwrap();

        let children: Vec<_> = t.children_of(weapon).map(TypeNode::full_name).collect();
        assert_eq!(children, vec!["Weapon.Axe", "Weapon.Melee", "Weapon.Sword"]);
        assert_eq!(t.item_types().count(), 4);
        assert!(t.resolve("Weapon.Bow").is_err());
    }
}
