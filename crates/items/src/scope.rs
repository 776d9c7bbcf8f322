use crate::taxonomy::TypeNode;

/// The set of types a container accepts.
///
/// A type is accepted when any accepted node is the type itself or one of its
/// ancestors, so accepting a category accepts everything filed under it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeScope {
    accepted: Vec<TypeNode>,
}

impl TypeScope {
    pub fn new(accepted: impl IntoIterator<Item = TypeNode>) -> Self {
        Self {
            accepted: accepted.into_iter().collect(),
        }
    }

    /// A scope that accepts nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn contains(&self, node: &TypeNode) -> bool {
        self.accepted.iter().any(|accepted| node.belongs_to(accepted))
    }

    pub fn accepted(&self) -> &[TypeNode] {
        &self.accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::Taxonomy;

    #[test]
    fn accepting_a_category_accepts_its_descendants() {
        let mut b = Taxonomy::builder();
        let weapon = b.category("Weapon", None).unwrap();
        let sword = b.item_type("Sword", Some("Weapon")).unwrap();
        let potion = b.item_type("Potion", None).unwrap();

        let scope = TypeScope::new([weapon.clone()]);
        assert!(scope.contains(&weapon));
        assert!(scope.contains(&sword));
        assert!(!scope.contains(&potion));

        let narrow = TypeScope::new([sword.clone()]);
        assert!(narrow.contains(&sword));
        assert!(!narrow.contains(&weapon));

        assert!(!TypeScope::empty().contains(&sword));
    }
}
