//! The inventory ledger: quantities per item identity, restricted to a type scope.

use std::collections::{BTreeMap, HashMap, btree_map, hash_map};

use tracing::{debug, warn};
use uuid::Uuid;

use satchel_core::{Entity, LedgerId};
use satchel_events::{EventEnvelope, ListenerId, Listeners};
use satchel_items::{Item, TypeNode, TypeScope};

use crate::error::LedgerError;
use crate::operation::{ItemOperation, OperationKind, QuantityChange};

static NO_ITEMS: BTreeMap<Item, i64> = BTreeMap::new();

/// Quantities of item identities, indexed by exact item type.
///
/// Every stored quantity is at least 1: an identity whose quantity reaches
/// zero is removed, together with its type bucket once that is empty.
/// Each successful mutation is reported to the subscribed listeners before
/// the mutating call returns, wrapped in an envelope carrying this ledger's id
/// and a sequence number starting at 1.
///
/// Listeners only get a shared view of the event, so they cannot mutate the
/// ledger from inside a notification.
#[derive(Debug)]
pub struct InventoryLedger {
    id: LedgerId,
    scope: TypeScope,
    items: HashMap<TypeNode, BTreeMap<Item, i64>>,
    sequence: u64,
    listeners: Listeners<EventEnvelope<ItemOperation>>,
}

impl InventoryLedger {
    pub fn new(scope: TypeScope) -> Self {
        Self::with_id(LedgerId::new(), scope)
    }

    pub fn with_id(id: LedgerId, scope: TypeScope) -> Self {
        Self {
            id,
            scope,
            items: HashMap::new(),
            sequence: 0,
            listeners: Listeners::new(),
        }
    }

    pub fn scope(&self) -> &TypeScope {
        &self.scope
    }

    /// Sequence number of the last emitted event (0 if none yet).
    pub fn sequence_number(&self) -> u64 {
        self.sequence
    }

    /// Whether the item's type falls inside the accepted scope.
    pub fn can_store(&self, item: &Item) -> bool {
        self.scope.contains(item.item_type())
    }

    /// Add `quantity` units of `item`.
    pub fn try_add(&mut self, quantity: i64, item: &Item) -> Result<QuantityChange, LedgerError> {
        if quantity < 1 {
            return Err(LedgerError::InvalidQuantity { quantity });
        }
        if !self.can_store(item) {
            return Err(LedgerError::NotAccepted {
                item: item.to_string(),
            });
        }

        let old = self.count(item);
        let new = old
            .checked_add(quantity)
            .ok_or_else(|| LedgerError::QuantityOverflow {
                item: item.to_string(),
            })?;

        self.items
            .entry(item.item_type().clone())
            .or_default()
            .insert(item.clone(), new);

        debug!(item = %item, old, new, "item added");
        self.emit(item, old, new, OperationKind::Add);
        Ok(QuantityChange { old, new })
    }

    /// Boolean form of [`InventoryLedger::try_add`]: refusals are logged, not returned.
    pub fn add(&mut self, quantity: i64, item: &Item) -> bool {
        match self.try_add(quantity, item) {
            Ok(_) => true,
            Err(err) => {
                self.report(&err);
                false
            }
        }
    }

    pub fn add_one(&mut self, item: &Item) -> bool {
        self.add(1, item)
    }

    /// Remove `quantity` units of `item`.
    ///
    /// Removing more than is stored is allowed: it logs a warning and empties
    /// the entry. The reported new quantity is then 0.
    pub fn try_remove(
        &mut self,
        quantity: i64,
        item: &Item,
    ) -> Result<QuantityChange, LedgerError> {
        if quantity < 1 {
            return Err(LedgerError::InvalidQuantity { quantity });
        }
        if !self.can_store(item) {
            return Err(LedgerError::NotAccepted {
                item: item.to_string(),
            });
        }

        let old = self.count(item);
        if old == 0 {
            return Err(LedgerError::NotPresent {
                item: item.to_string(),
            });
        }
        if old < quantity {
            warn!(item = %item, requested = quantity, stored = old, "removing more than stored");
        }

        let remaining = old - quantity;
        if remaining > 0 {
            if let Some(bucket) = self.items.get_mut(item.item_type()) {
                bucket.insert(item.clone(), remaining);
            }
        } else {
            self.forget(item);
        }

        let new = remaining.max(0);
        debug!(item = %item, old, new, "item removed");
        self.emit(item, old, new, OperationKind::Remove);
        Ok(QuantityChange { old, new })
    }

    /// Boolean form of [`InventoryLedger::try_remove`]: refusals are logged, not returned.
    pub fn remove(&mut self, quantity: i64, item: &Item) -> bool {
        match self.try_remove(quantity, item) {
            Ok(_) => true,
            Err(err) => {
                self.report(&err);
                false
            }
        }
    }

    pub fn remove_one(&mut self, item: &Item) -> bool {
        self.remove(1, item)
    }

    /// Drop every unit of `item`. Does nothing if it is not stored.
    pub fn remove_all(&mut self, item: &Item) -> Option<QuantityChange> {
        let old = self.forget(item)?;
        debug!(item = %item, old, "item cleared");
        self.emit(item, old, 0, OperationKind::Remove);
        Some(QuantityChange { old, new: 0 })
    }

    /// Stored quantity of exactly this identity, 0 if absent.
    pub fn count(&self, item: &Item) -> i64 {
        self.items
            .get(item.item_type())
            .and_then(|bucket| bucket.get(item))
            .copied()
            .unwrap_or(0)
    }

    /// Total quantity of identities whose type is exactly `node`.
    ///
    /// Descendant types are not included.
    pub fn count_type(&self, node: &TypeNode) -> i64 {
        self.of_type(node).values().sum()
    }

    /// Number of distinct identities matching `predicate`.
    pub fn count_matching(&self, mut predicate: impl FnMut(&Item) -> bool) -> usize {
        self.iter().filter(|&(item, _)| predicate(item)).count()
    }

    pub fn contains_at_least(&self, quantity: i64, item: &Item) -> bool {
        match self.count(item) {
            0 => false,
            stored => stored >= quantity,
        }
    }

    /// Identities of exactly type `node` with their quantities, ordered by item.
    pub fn of_type(&self, node: &TypeNode) -> &BTreeMap<Item, i64> {
        self.items.get(node).unwrap_or(&NO_ITEMS)
    }

    /// All stored identities with their quantities, in unspecified order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            buckets: self.items.values(),
            current: None,
        }
    }

    /// Number of distinct identities stored.
    pub fn len(&self) -> usize {
        self.items.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Register a change listener.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&EventEnvelope<ItemOperation>) + Send + 'static,
    ) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Remove the entry for `item`, dropping its type bucket if that empties it.
    fn forget(&mut self, item: &Item) -> Option<i64> {
        let hash_map::Entry::Occupied(mut bucket) = self.items.entry(item.item_type().clone())
        else {
            return None;
        };
        let removed = bucket.get_mut().remove(item);
        if bucket.get().is_empty() {
            bucket.remove();
        }
        removed
    }

    fn emit(&mut self, item: &Item, old_quantity: i64, new_quantity: i64, kind: OperationKind) {
        self.sequence += 1;
        let envelope = EventEnvelope::new(
            Uuid::now_v7(),
            self.id,
            self.sequence,
            ItemOperation {
                item: item.clone(),
                old_quantity,
                new_quantity,
                kind,
            },
        );
        self.listeners.notify(&envelope);
    }

    fn report(&self, err: &LedgerError) {
        match err {
            LedgerError::NotAccepted { .. } => debug!(ledger = %self.id, error = %err, "ledger refused item"),
            _ => warn!(ledger = %self.id, error = %err, "ledger operation rejected"),
        }
    }
}

impl Default for InventoryLedger {
    fn default() -> Self {
        Self::new(TypeScope::empty())
    }
}

impl Entity for InventoryLedger {
    type Id = LedgerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Iterator over `(item, quantity)` pairs of a ledger.
#[derive(Debug)]
pub struct Iter<'a> {
    buckets: hash_map::Values<'a, TypeNode, BTreeMap<Item, i64>>,
    current: Option<btree_map::Iter<'a, Item, i64>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a Item, i64);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((item, quantity)) = self.current.as_mut().and_then(Iterator::next) {
                return Some((item, *quantity));
            }
            self.current = Some(self.buckets.next()?.iter());
        }
    }
}

impl<'a> IntoIterator for &'a InventoryLedger {
    type Item = (&'a Item, i64);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
