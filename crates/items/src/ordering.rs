//! Item ordering strategies.
//!
//! Orderings are stateless values passed to whoever sorts; there is no
//! process-wide default instance.

use std::cmp::Ordering;

use crate::item::Item;

pub trait ItemOrdering {
    fn compare(&self, a: &Item, b: &Item) -> Ordering;

    /// Compare possibly-missing items: missing sorts first, the same
    /// reference is always equal.
    fn compare_optional(&self, a: Option<&Item>, b: Option<&Item>) -> Ordering {
        match (a, b) {
            (Some(a), Some(b)) if std::ptr::eq(a, b) => Ordering::Equal,
            (Some(a), Some(b)) => self.compare(a, b),
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
        }
    }
}

/// Full identity order: type, then name, then capabilities.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultOrdering;

impl ItemOrdering for DefaultOrdering {
    fn compare(&self, a: &Item, b: &Item) -> Ordering {
        a.cmp(b)
    }
}

/// Ordinal order of item names only.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByName;

impl ItemOrdering for ByName {
    fn compare(&self, a: &Item, b: &Item) -> Ordering {
        a.name().as_bytes().cmp(b.name().as_bytes())
    }
}

/// Order of item types only.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByType;

impl ItemOrdering for ByType {
    fn compare(&self, a: &Item, b: &Item) -> Ordering {
        a.item_type().cmp(b.item_type())
    }
}

/// Stable sort of `items` under `ordering`.
pub fn sort_items<O: ItemOrdering + ?Sized>(items: &mut [Item], ordering: &O) {
    items.sort_by(|a, b| ordering.compare(a, b));
}
