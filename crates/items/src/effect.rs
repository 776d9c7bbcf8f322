//! Capability effects on targets.
//!
//! A target type declares which capability kinds can affect it through
//! [`EffectTarget::effect_of`]; the capability itself implements
//! [`Affect`] for that target. A bag walks its capabilities and applies the
//! ones the target recognises, so the set of (capability, target) pairs is
//! fixed at compile time and needs no runtime type tests.
//!
//! Effects must not depend on the order they are applied in.

use crate::capability::{Capability, CarryWeight, Merchandise, Stackable};
use crate::item::Item;

/// A capability's effect on a target of type `T`.
pub trait Affect<T> {
    fn affect(&self, item: &Item, target: &mut T);
}

/// A type that capabilities can be applied to.
pub trait EffectTarget: Sized {
    /// The effect `capability` has on `Self`, if any.
    fn effect_of(capability: &Capability) -> Option<&dyn Affect<Self>>;
}

/// Running total of carried weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarryLoad {
    pub total_weight: u64,
}

impl Affect<CarryLoad> for CarryWeight {
    fn affect(&self, _: &Item, target: &mut CarryLoad) {
        target.total_weight += u64::from(self.weight);
    }
}

impl EffectTarget for CarryLoad {
    fn effect_of(capability: &Capability) -> Option<&dyn Affect<Self>> {
        match capability {
            Capability::CarryWeight(c) => Some(c),
            _ => None,
        }
    }
}

/// Buy and sell totals of the items passed through a shop counter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Appraisal {
    pub buy_total: u64,
    pub sell_total: u64,
    pub appraised: Vec<String>,
}

impl Affect<Appraisal> for Merchandise {
    fn affect(&self, item: &Item, target: &mut Appraisal) {
        target.buy_total += u64::from(self.price());
        target.sell_total += u64::from(self.worth());
        target.appraised.push(item.name().to_string());
    }
}

impl EffectTarget for Appraisal {
    fn effect_of(capability: &Capability) -> Option<&dyn Affect<Self>> {
        match capability {
            Capability::Merchandise(c) => Some(c),
            _ => None,
        }
    }
}

/// Slot layout for a group of items: the tightest stack limit among them.
///
/// `None` means nothing seen so far was stackable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotPlan {
    pub stack_limit: Option<u32>,
}

impl Affect<SlotPlan> for Stackable {
    fn affect(&self, _: &Item, target: &mut SlotPlan) {
        let limit = self.stack_limit();
        target.stack_limit = Some(target.stack_limit.map_or(limit, |current| current.min(limit)));
    }
}

impl EffectTarget for SlotPlan {
    fn effect_of(capability: &Capability) -> Option<&dyn Affect<Self>> {
        match capability {
            Capability::Stackable(c) => Some(c),
            _ => None,
        }
    }
}
