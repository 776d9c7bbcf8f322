//! Property bag: at most one capability per kind, compared as a set.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use tracing::warn;

use satchel_core::ValueObject;

use crate::capability::{Capability, CapabilityFamily, CapabilityKind, CapabilityType};
use crate::effect::EffectTarget;
use crate::item::Item;

/// The capabilities attached to one item.
///
/// A bag is owned by exactly one [`Item`]. Effects are applied only through
/// [`Item::affect`], which hands the owning item to each capability; the bag
/// itself offers no way to act on behalf of another item. Iteration order is
/// an implementation detail and must not be relied upon.
///
/// ```compile_fail
/// use satchel_items::{CarryLoad, Item, PropertyBag, TypeNode};
///
/// let stranger = Item::plain(TypeNode::item_type("Rock", None).unwrap(), "Pebble");
/// let mut load = CarryLoad::default();
/// PropertyBag::new().affect(&stranger, &mut load);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PropertyBag {
    entries: BTreeMap<CapabilityKind, Capability>,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a copy of `template`.
    ///
    /// If a capability of the same kind is already attached, the template is
    /// dropped with a warning and the existing capability stays.
    pub fn with<C>(mut self, template: &C) -> Self
    where
        C: Clone + Into<Capability>,
    {
        self.attach(template.clone().into());
        self
    }

    /// Attach copies of every template, first one of each kind wins.
    pub fn with_all<'a>(mut self, templates: impl IntoIterator<Item = &'a Capability>) -> Self {
        for template in templates {
            self.attach(template.instantiate());
        }
        self
    }

    fn attach(&mut self, capability: Capability) {
        match self.entries.entry(capability.kind()) {
            Entry::Occupied(existing) => {
                warn!(
                    kind = %capability.kind(),
                    kept = %existing.get(),
                    dropped = %capability,
                    "duplicate capability ignored"
                );
            }
            Entry::Vacant(slot) => {
                slot.insert(capability);
            }
        }
    }

    pub fn has_exactly<K: CapabilityType>(&self) -> bool {
        self.entries.contains_key(&K::KIND)
    }

    pub fn get_exactly<K: CapabilityType>(&self) -> Option<&K> {
        self.entries.get(&K::KIND).and_then(K::from_capability)
    }

    /// True if any attached capability belongs to family `F`.
    pub fn has<F: CapabilityFamily>(&self) -> bool {
        self.entries.keys().any(|kind| F::admits(*kind))
    }

    /// Every attached capability that belongs to family `F`.
    pub fn all_of<F: CapabilityFamily>(&self) -> impl Iterator<Item = &Capability> {
        self.entries.values().filter(|c| F::admits(c.kind()))
    }

    /// Apply every capability that can affect `T` to `target`, on behalf of `owner`.
    ///
    /// `owner` must be the item holding this bag.
    pub(crate) fn affect<T: EffectTarget>(&self, owner: &Item, target: &mut T) {
        for capability in self.entries.values() {
            if let Some(effect) = T::effect_of(capability) {
                effect.affect(owner, target);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Capability> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Capabilities sorted by their own total order.
    pub fn sorted(&self) -> Vec<&Capability> {
        let mut sorted: Vec<_> = self.entries.values().collect();
        sorted.sort();
        sorted
    }
}

impl PartialEq for PropertyBag {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .values()
                .all(|mine| other.entries.values().any(|theirs| theirs == mine))
    }
}

impl Eq for PropertyBag {}

impl PartialOrd for PropertyBag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PropertyBag {
    /// Element-wise over both sorted capability lists, up to the shorter
    /// length; if those all tie, the bag with fewer capabilities sorts first.
    fn cmp(&self, other: &Self) -> Ordering {
        let mine = self.sorted();
        let theirs = other.sorted();

        mine.iter()
            .zip(theirs.iter())
            .map(|(a, b)| a.cmp(b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or_else(|| mine.len().cmp(&theirs.len()))
    }
}

impl Hash for PropertyBag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Sum of element hashes, so the result does not depend on order.
        let combined = self
            .entries
            .values()
            .map(|capability| {
                let mut h = DefaultHasher::new();
                capability.hash(&mut h);
                h.finish()
            })
            .fold(0u64, u64::wrapping_add);

        state.write_usize(self.len());
        state.write_u64(combined);
    }
}

impl ValueObject for PropertyBag {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{
        AnyCapability, CarryWeight, Merchandise, Physical, Stackable, Tradeable,
    };
    use crate::effect::{Appraisal, CarryLoad, SlotPlan};
    use crate::taxonomy::TypeNode;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut h = DefaultHasher::new();
        value.hash(&mut h);
        h.finish()
    }

    fn weight(w: u32) -> Capability {
        CarryWeight::new(w).into()
    }

    fn price(p: u32) -> Capability {
        Merchandise::new(p).into()
    }

    fn stack(limit: u32) -> Capability {
        Stackable::new(limit).unwrap().into()
    }

    #[test]
    fn first_capability_of_a_kind_wins() {
        let bag = PropertyBag::new()
            .with(&CarryWeight::new(1))
            .with(&CarryWeight::new(2));

        assert_eq!(bag.len(), 1);
        assert_eq!(bag.get_exactly::<CarryWeight>(), Some(&CarryWeight::new(1)));
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn dropped_duplicate_is_logged_as_a_warning() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_writer(move || writer.clone())
            .finish();

        let bag = tracing::subscriber::with_default(subscriber, || {
            PropertyBag::new().with(&weight(1)).with(&price(4)).with(&weight(2))
        });

        let text = String::from_utf8_lossy(&logs.0.lock().unwrap()).into_owned();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains("duplicate capability ignored"));
        assert!(text.contains("\"level\":\"WARN\""));
        assert!(text.contains("\"kept\":\"weight 1\""));
        assert!(text.contains("\"dropped\":\"weight 2\""));
        assert_eq!(bag.len(), 2);
    }

    #[test]
    fn with_copies_the_template() {
        let template = weight(5);
        let bag = PropertyBag::new().with(&template);
        let attached = bag.iter().next().unwrap();

        assert_eq!(attached, &template);
        assert!(!std::ptr::eq(attached, &template));
    }

    #[test]
    fn exact_and_family_lookups() {
        let bag = PropertyBag::new().with(&weight(3)).with(&stack(10));

        assert!(bag.has_exactly::<CarryWeight>());
        assert!(!bag.has_exactly::<Merchandise>());
        assert_eq!(bag.get_exactly::<Stackable>().map(Stackable::stack_limit), Some(10));
        assert!(bag.get_exactly::<Merchandise>().is_none());

        assert!(bag.has::<Physical>());
        assert!(!bag.has::<Tradeable>());
        assert_eq!(bag.all_of::<Physical>().count(), 2);
        assert_eq!(bag.all_of::<Tradeable>().count(), 0);
        assert_eq!(bag.all_of::<AnyCapability>().count(), 2);
        assert!(!PropertyBag::new().has::<AnyCapability>());
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a = PropertyBag::new().with(&weight(1)).with(&price(4));
        let b = PropertyBag::new().with(&price(4)).with(&weight(1));

        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Equal);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn different_contents_are_unequal() {
        let a = PropertyBag::new().with(&weight(1));
        let b = PropertyBag::new().with(&weight(2));
        let c = PropertyBag::new().with(&weight(1)).with(&price(1));

        assert_ne!(a, b);
        assert_ne!(a, c);
        assert!(a < b);
    }

    #[test]
    fn larger_bag_wins_only_after_shared_prefix_ties() {
        let two = PropertyBag::new().with(&weight(1)).with(&price(5));
        let three = PropertyBag::new()
            .with(&weight(1))
            .with(&price(5))
            .with(&stack(4));

        assert_eq!(three.cmp(&two), Ordering::Greater);
        assert_eq!(two.cmp(&three), Ordering::Less);

        // An element-wise difference beats the count tiebreak.
        let heavier_pair = PropertyBag::new().with(&weight(2)).with(&price(5));
        assert_eq!(heavier_pair.cmp(&three), Ordering::Greater);
        assert!(PropertyBag::new() < two);
    }

    #[test]
    fn affect_only_uses_matching_capabilities() {
        let potion_type = TypeNode::item_type("Potion", None).unwrap();
        let item = Item::new(
            potion_type,
            "Elixir",
            PropertyBag::new().with(&weight(2)).with(&price(30)).with(&stack(5)),
        );

        let mut load = CarryLoad::default();
        item.affect(&mut load);
        assert_eq!(load.total_weight, 2);

        let mut appraisal = Appraisal::default();
        item.affect(&mut appraisal);
        assert_eq!(appraisal.buy_total, 30);
        assert_eq!(appraisal.appraised, vec!["Elixir".to_string()]);

        let mut plan = SlotPlan::default();
        item.affect(&mut plan);
        assert_eq!(plan.stack_limit, Some(5));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn capability() -> impl Strategy<Value = Capability> {
            prop_oneof![
                (0u32..50).prop_map(|w| Capability::from(CarryWeight::new(w))),
                (0u32..50, 0u32..50)
                    .prop_map(|(p, w)| Capability::from(Merchandise::with_resale(p, w))),
                (2u32..50).prop_map(|l| Capability::from(Stackable::new(l).unwrap())),
            ]
        }

        /// At most one capability of each kind.
        fn distinct_kinds() -> impl Strategy<Value = Vec<Capability>> {
            (
                proptest::option::of(0u32..50),
                proptest::option::of((0u32..50, 0u32..50)),
                proptest::option::of(2u32..50),
            )
                .prop_map(|(weight, offer, limit)| {
                    let mut caps = Vec::new();
                    if let Some(w) = weight {
                        caps.push(Capability::from(CarryWeight::new(w)));
                    }
                    if let Some((p, w)) = offer {
                        caps.push(Capability::from(Merchandise::with_resale(p, w)));
                    }
                    if let Some(l) = limit {
                        caps.push(Capability::from(Stackable::new(l).unwrap()));
                    }
                    caps
                })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: building a bag in any order gives the same bag.
            #[test]
            fn equality_and_hash_are_order_independent(
                (templates, shuffled) in distinct_kinds()
                    .prop_flat_map(|caps| (Just(caps.clone()), Just(caps).prop_shuffle()))
            ) {
                let forward = PropertyBag::new().with_all(&templates);
                let reordered = PropertyBag::new().with_all(&shuffled);

                prop_assert_eq!(&forward, &reordered);
                prop_assert_eq!(forward.cmp(&reordered), Ordering::Equal);
                prop_assert_eq!(hash_of(&forward), hash_of(&reordered));
            }

            /// Property: ordering agrees with equality and is antisymmetric.
            #[test]
            fn ordering_is_consistent_with_equality(
                a in proptest::collection::vec(capability(), 0..4),
                b in proptest::collection::vec(capability(), 0..4)
            ) {
                let a = PropertyBag::new().with_all(&a);
                let b = PropertyBag::new().with_all(&b);

                prop_assert_eq!(a.cmp(&b) == Ordering::Equal, a == b);
                prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
            }
        }
    }
}
