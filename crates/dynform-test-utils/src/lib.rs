//! Testing utilities for the dynform workspace
//!
//! Shared fixtures and a recording observer.

#![allow(missing_docs)]

use dynform_core::{
    CollectionKind, EntryId, FieldPath, FormChange, FormStore, FriendEntry, HexColor, ObserverFn,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// Friend as added by the "Add Friend" button, with a name
pub fn friend_named(name: &str) -> FriendEntry {
    FriendEntry::with_color(HexColor::BLUE).named(name)
}

/// Defaults JSON the "Add Friend" button passes to `append_entry`
pub fn blue_friend_defaults() -> serde_json::Value {
    serde_json::json!({ "favorites": { "color": "#0000ff" } })
}

/// Store holding friends named `friend-0` .. `friend-{n-1}`
pub fn store_with_friends(n: usize) -> (FormStore, Vec<EntryId>) {
    let mut store = FormStore::new();
    let ids = (0..n)
        .map(|i| store.append_friend(friend_named(&format!("friend-{i}"))))
        .collect();
    (store, ids)
}

/// Names of the friends in index order (`None` for unnamed)
pub fn friend_names(store: &FormStore) -> Vec<Option<String>> {
    store
        .state()
        .friends
        .values()
        .map(|friend| friend.name.clone())
        .collect()
}

/// Observer that records every change it receives
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    changes: Arc<Mutex<Vec<FormChange>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callback to hand to `FormStore::subscribe`
    pub fn callback(&self) -> ObserverFn {
        let changes = Arc::clone(&self.changes);
        Box::new(move |change, _| changes.lock().push(change.clone()))
    }

    /// Subscribe to `watch` on `store`
    pub fn watch(&self, store: &mut FormStore, watch: &str) {
        store.subscribe(watch, self.callback()).unwrap();
    }

    pub fn changes(&self) -> Vec<FormChange> {
        self.changes.lock().clone()
    }

    /// Paths of recorded changes, as strings
    pub fn paths(&self) -> Vec<String> {
        self.changes
            .lock()
            .iter()
            .map(|change| change.path.to_string())
            .collect()
    }

    pub fn count(&self) -> usize {
        self.changes.lock().len()
    }
}

/// Path of one friend field
pub fn friend_path(index: usize, field: &str) -> String {
    let path = CollectionKind::Friends.path().index(index);
    let path = field
        .split('.')
        .fold(path, |path: FieldPath, key| path.child(key));
    path.to_string()
}
