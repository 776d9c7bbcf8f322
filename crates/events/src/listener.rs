//! Synchronous listener registry.
//!
//! Listeners are plain callbacks invoked in registration order, on the
//! caller's thread, before the mutating call that produced the message
//! returns. There is no queue and no retry: a listener sees each message
//! exactly once.
//!
//! A listener is handed a shared reference to the message only. Because the
//! owner of the registry is mutably borrowed while it notifies, a listener
//! cannot reach back into it and mutate it mid-update.
//!
//! Callbacks must be `Send`, so a registry (and the ledger owning it) can be
//! moved to another thread or kept behind a mutex.

use std::fmt;

/// Handle returned by [`Listeners::subscribe`], used to detach the listener.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback<M> = Box<dyn FnMut(&M) + Send>;

pub struct Listeners<M> {
    next_id: u64,
    entries: Vec<(ListenerId, Callback<M>)>,
}

impl<M> Listeners<M> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&M) + Send + 'static) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.entries.push((id, Box::new(listener)));
        id
    }

    /// Detach a listener. Returns `false` if the id was unknown.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(existing, _)| *existing != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deliver `message` to every listener, in registration order.
    pub fn notify(&mut self, message: &M) {
        for (_, listener) in &mut self.entries {
            listener(message);
        }
    }
}

impl<M> Default for Listeners<M> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<M> fmt::Debug for Listeners<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
