//! Path-scoped change subscriptions
//!
//! Observers declare the path they depend on and are re-invoked only for
//! changes that can affect it. Delivery is synchronous and in subscription
//! order.

use crate::collection::EntryId;
use crate::model::FormState;
use crate::path::{FieldPath, Segment};
use indexmap::IndexMap;
use std::fmt::{self, Debug, Formatter};

/// Handle returned by [`FormStore::subscribe`](crate::FormStore::subscribe)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// What kind of mutation happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// A scalar slot took a new value
    FieldSet,
    /// An entry was appended to the collection at `path`
    EntryAppended { id: EntryId, index: usize },
    /// An entry was removed from the collection at `path`
    EntryRemoved { id: EntryId, index: usize },
}

/// One effective mutation of the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormChange {
    /// Written slot, or the collection for structural changes
    pub path: FieldPath,
    pub kind: ChangeKind,
    /// Store revision after the change
    pub revision: u64,
}

impl FormChange {
    /// Check if the change can affect a watcher of `watch`
    ///
    /// Structural changes at index `i` shift or create entries `>= i` only,
    /// so watchers of earlier entries are skipped.
    #[must_use]
    pub fn touches(&self, watch: &FieldPath) -> bool {
        if !self.path.overlaps(watch) {
            return false;
        }
        match self.kind {
            ChangeKind::FieldSet => true,
            ChangeKind::EntryAppended { index, .. } | ChangeKind::EntryRemoved { index, .. } => {
                match watch.segments().get(self.path.len()) {
                    Some(Segment::Index(watched)) => *watched >= index,
                    _ => true,
                }
            }
        }
    }
}

/// Observer callback; receives the change and the post-change state
pub type ObserverFn = Box<dyn FnMut(&FormChange, &FormState) + Send>;

struct Watcher {
    watch: FieldPath,
    callback: ObserverFn,
}

impl Debug for Watcher {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Watcher")
            .field("watch", &self.watch)
            .finish_non_exhaustive()
    }
}

/// Registry of path-scoped observers
#[derive(Debug, Default)]
pub struct ObserverRegistry {
    next: u64,
    watchers: IndexMap<SubscriptionId, Watcher>,
}

impl ObserverRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer of `watch` (the root path watches everything)
    pub fn subscribe(&mut self, watch: FieldPath, callback: ObserverFn) -> SubscriptionId {
        self.next += 1;
        let id = SubscriptionId(self.next);
        self.watchers.insert(id, Watcher { watch, callback });
        id
    }

    /// Remove an observer; returns `false` if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.watchers.shift_remove(&id).is_some()
    }

    /// Number of registered observers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.watchers.len()
    }

    /// Check if no observers are registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.watchers.is_empty()
    }

    /// Deliver a change; returns how many observers were invoked
    pub fn notify(&mut self, change: &FormChange, state: &FormState) -> usize {
        let mut delivered = 0;
        for watcher in self.watchers.values_mut() {
            if change.touches(&watcher.watch) {
                (watcher.callback)(change, state);
                delivered += 1;
            }
        }
        delivered
    }
}
