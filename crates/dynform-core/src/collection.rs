//! Repeatable collections with stable entry identities
//!
//! An [`EntryCollection`] is an ordered arena: the position of an entry is a
//! transient address, its [`EntryId`] is the identity renderers key on.

use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt::{self, Display, Formatter};

/// Opaque identity of a collection entry
///
/// Minted once at insertion, never changed, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct EntryId(u64);

impl EntryId {
    /// Raw counter value
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Display for EntryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "entry-{}", self.0)
    }
}

/// Monotonic source of [`EntryId`]s
///
/// One allocator serves every collection of a store, so identities are
/// unique across collections as well.
#[derive(Debug)]
pub struct EntryIdAllocator {
    next: u64,
}

impl EntryIdAllocator {
    /// Create allocator whose first id is `1`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Mint a fresh id
    #[inline]
    pub fn mint(&mut self) -> EntryId {
        let id = EntryId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids minted so far
    #[inline]
    #[must_use]
    pub fn minted(&self) -> u64 {
        self.next - 1
    }
}

impl Default for EntryIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// A value paired with its identity
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<T> {
    id: EntryId,
    value: T,
}

impl<T> Entry<T> {
    /// Identity of the entry
    #[inline]
    #[must_use]
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Current field values
    #[inline]
    #[must_use]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Mutable field values
    #[inline]
    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Consume into the value
    #[inline]
    #[must_use]
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Ordered collection of identified entries
///
/// Serializes as a plain array of values; identities stay out of snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryCollection<T> {
    entries: Vec<Entry<T>>,
}

impl<T> EntryCollection<T> {
    /// Create empty collection
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry at the end, returning its index
    pub fn push(&mut self, id: EntryId, value: T) -> usize {
        self.entries.push(Entry { id, value });
        self.entries.len() - 1
    }

    /// Remove the entry at `index`, shifting later entries left
    ///
    /// Returns `None` if `index` is out of range.
    pub fn remove(&mut self, index: usize) -> Option<Entry<T>> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    /// Entry at `index`
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Entry<T>> {
        self.entries.get(index)
    }

    /// Mutable entry at `index`
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Entry<T>> {
        self.entries.get_mut(index)
    }

    /// Current index of the entry with `id`
    #[must_use]
    pub fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    /// Entry with `id`, wherever it currently sits
    #[must_use]
    pub fn get_by_id(&self, id: EntryId) -> Option<&Entry<T>> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Identities in index order
    #[must_use]
    pub fn ids(&self) -> Vec<EntryId> {
        self.entries.iter().map(|entry| entry.id).collect()
    }

    /// Iterate entries in index order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Entry<T>> {
        self.entries.iter()
    }

    /// Iterate values in index order
    #[inline]
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|entry| &entry.value)
    }
}

impl<T> Default for EntryCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Serialize> Serialize for EntryCollection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for value in self.values() {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}
