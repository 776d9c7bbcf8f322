use serde::{Deserialize, Serialize};

use satchel_events::Event;
use satchel_items::Item;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Add,
    Remove,
}

/// Event: the stored quantity of one item identity changed.
///
/// `new_quantity` is never negative; a removal that empties the entry reports 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOperation {
    pub item: Item,
    pub old_quantity: i64,
    pub new_quantity: i64,
    pub kind: OperationKind,
}

impl ItemOperation {
    pub fn change(&self) -> QuantityChange {
        QuantityChange {
            old: self.old_quantity,
            new: self.new_quantity,
        }
    }
}

impl Event for ItemOperation {
    fn event_type(&self) -> &'static str {
        match self.kind {
            OperationKind::Add => "inventory.item.added",
            OperationKind::Remove => "inventory.item.removed",
        }
    }

    fn version(&self) -> u32 {
        1
    }
}

/// Quantities before and after a successful mutation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuantityChange {
    pub old: i64,
    pub new: i64,
}

impl QuantityChange {
    pub fn delta(&self) -> i64 {
        self.new - self.old
    }
}
