//! Form state store
//!
//! [`FormStore`] is the single source of truth for every field value and
//! repeatable collection. It is constructed once and passed explicitly to
//! whatever reads or writes the form; there is no ambient instance.
//!
//! All operations are synchronous: a write is visible to the next read and
//! to every observer before the call returns.

use crate::action::{ActionOutcome, FormAction};
use crate::collection::{EntryId, EntryIdAllocator};
use crate::config::FormConfig;
use crate::error::FormError;
use crate::model::{CollectionKind, FormState, FriendEntry, SkillEntry};
use crate::observer::{ChangeKind, FormChange, ObserverFn, ObserverRegistry, SubscriptionId};
use crate::path::FieldPath;
use crate::slot::Slot;
use crate::value::{FieldKind, FieldValue};

/// Form state store
#[derive(Debug)]
pub struct FormStore {
    state: FormState,
    ids: EntryIdAllocator,
    observers: ObserverRegistry,
    config: FormConfig,
    revision: u64,
}

impl FormStore {
    /// Create store with default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(FormConfig::default())
    }

    /// Create store with configuration
    #[must_use]
    pub fn with_config(config: FormConfig) -> Self {
        Self {
            state: FormState::new(config.defaults.likes_typescript),
            ids: EntryIdAllocator::new(),
            observers: ObserverRegistry::new(),
            config,
            revision: 0,
        }
    }

    /// Configuration the store was built with
    #[inline]
    #[must_use]
    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Borrow the current state
    #[inline]
    #[must_use]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Number of effective mutations so far
    #[inline]
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Write raw control input at `path`
    ///
    /// Input is coerced by the slot's kind. Returns `true` if the stored
    /// value changed; writing the current value again notifies nobody.
    ///
    /// # Errors
    /// Returns error if the path does not resolve to an existing scalar
    /// slot or the input is rejected for the slot's kind
    pub fn set_field(&mut self, path: &str, raw: &str) -> Result<bool, FormError> {
        let (path, slot) = self.resolve(path)?;
        self.write_slot(&path, slot, raw)
    }

    /// Read the current value at `path`
    ///
    /// Slots that were never set read as their default, or
    /// [`FieldValue::Absent`] for optional fields.
    ///
    /// # Errors
    /// Returns error if the path does not resolve to an existing scalar slot
    pub fn get_field(&self, path: &str) -> Result<FieldValue, FormError> {
        let (_, slot) = self.resolve(path)?;
        slot.read(&self.state)
    }

    /// Constrained write to an enum field
    ///
    /// # Errors
    /// - [`FormError::NotAnEnum`] if `field` is not an enum field
    /// - [`FormError::InvalidEnumValue`] if `value` is not allowed
    pub fn set_enum(&mut self, field: &str, value: &str) -> Result<bool, FormError> {
        let (path, slot) = self.resolve(field)?;
        if slot.kind() != FieldKind::Choice {
            let err = FormError::NotAnEnum {
                field: path.to_string(),
            };
            tracing::warn!(error = %err, "rejected enum write");
            return Err(err);
        }
        self.write_slot(&path, slot, value)
    }

    /// Complete current state
    #[must_use]
    pub fn snapshot(&self) -> FormState {
        self.state.clone()
    }

    /// Complete current state as plain JSON
    ///
    /// # Errors
    /// Returns error if serialization fails
    pub fn snapshot_json(&self) -> Result<serde_json::Value, FormError> {
        Ok(serde_json::to_value(&self.state)?)
    }

    /// Append an entry built from JSON `defaults` (`null` means none)
    ///
    /// # Errors
    /// Returns [`FormError::InvalidDefaults`] if `defaults` does not match
    /// the collection's record shape
    pub fn append_entry(
        &mut self,
        collection: CollectionKind,
        defaults: serde_json::Value,
    ) -> Result<EntryId, FormError> {
        let defaults = if defaults.is_null() {
            serde_json::Value::Object(serde_json::Map::new())
        } else {
            defaults
        };
        let parsed = match collection {
            CollectionKind::Skills => serde_json::from_value::<SkillEntry>(defaults)
                .map(|entry| self.append_skill(entry)),
            CollectionKind::Friends => serde_json::from_value::<FriendEntry>(defaults)
                .map(|entry| self.append_friend(entry)),
        };
        parsed.map_err(|source| {
            let err = FormError::InvalidDefaults { collection, source };
            tracing::warn!(collection = %collection, error = %err, "rejected entry defaults");
            err
        })
    }

    /// Append a skill
    pub fn append_skill(&mut self, entry: SkillEntry) -> EntryId {
        let id = self.ids.mint();
        let index = self.state.skills.push(id, entry);
        self.commit_append(CollectionKind::Skills, id, index);
        id
    }

    /// Append a friend
    pub fn append_friend(&mut self, entry: FriendEntry) -> EntryId {
        let id = self.ids.mint();
        let index = self.state.friends.push(id, entry);
        self.commit_append(CollectionKind::Friends, id, index);
        id
    }

    /// Append an empty skill ("Add Skill")
    pub fn append_default_skill(&mut self) -> EntryId {
        self.append_skill(SkillEntry::default())
    }

    /// Append a friend with the configured favorite color ("Add Friend")
    pub fn append_default_friend(&mut self) -> EntryId {
        self.append_friend(FriendEntry::with_color(self.config.defaults.friend_color))
    }

    /// Remove the entry at `index`; later entries shift left
    ///
    /// Returns the removed entry's identity.
    ///
    /// # Errors
    /// Returns [`FormError::IndexOutOfRange`] if there is no entry at `index`
    pub fn remove_entry(
        &mut self,
        collection: CollectionKind,
        index: usize,
    ) -> Result<EntryId, FormError> {
        let len = self.state.len_of(collection);
        let removed = match collection {
            CollectionKind::Skills => self.state.skills.remove(index).map(|e| e.id()),
            CollectionKind::Friends => self.state.friends.remove(index).map(|e| e.id()),
        };

        let Some(id) = removed else {
            let err = FormError::IndexOutOfRange {
                collection,
                index,
                len,
            };
            tracing::warn!(error = %err, "rejected entry removal");
            return Err(err);
        };

        self.commit(collection.path(), ChangeKind::EntryRemoved { id, index });
        Ok(id)
    }

    /// Identities of a collection in index order, for render keys
    #[must_use]
    pub fn entry_ids(&self, collection: CollectionKind) -> Vec<EntryId> {
        match collection {
            CollectionKind::Skills => self.state.skills.ids(),
            CollectionKind::Friends => self.state.friends.ids(),
        }
    }

    /// Current index of an entry
    #[must_use]
    pub fn index_of(&self, collection: CollectionKind, id: EntryId) -> Option<usize> {
        match collection {
            CollectionKind::Skills => self.state.skills.position(id),
            CollectionKind::Friends => self.state.friends.position(id),
        }
    }

    /// Observe changes that can affect `watch` (`""` watches everything)
    ///
    /// # Errors
    /// Returns error if `watch` is not a valid path
    pub fn subscribe(&mut self, watch: &str, callback: ObserverFn) -> Result<SubscriptionId, FormError> {
        let watch: FieldPath = watch.parse()?;
        Ok(self.subscribe_path(watch, callback))
    }

    /// Observe changes that can affect an already parsed path
    pub fn subscribe_path(&mut self, watch: FieldPath, callback: ObserverFn) -> SubscriptionId {
        tracing::trace!(watch = %watch, "observer subscribed");
        self.observers.subscribe(watch, callback)
    }

    /// Stop an observer; returns `false` if it was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Number of active observers
    #[inline]
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Apply one serialized action
    ///
    /// # Errors
    /// Returns the error of the underlying operation
    pub fn apply(&mut self, action: &FormAction) -> Result<ActionOutcome, FormError> {
        match action {
            FormAction::SetField { path, value } => {
                self.set_field(path, value).map(ActionOutcome::Written)
            }
            FormAction::SetEnum { field, value } => {
                self.set_enum(field, value).map(ActionOutcome::Written)
            }
            FormAction::AppendEntry {
                collection,
                defaults,
            } => self
                .append_entry(*collection, defaults.clone())
                .map(ActionOutcome::Appended),
            FormAction::RemoveEntry { collection, index } => self
                .remove_entry(*collection, *index)
                .map(ActionOutcome::Removed),
        }
    }

    fn resolve(&self, path: &str) -> Result<(FieldPath, Slot), FormError> {
        let resolved = path
            .parse::<FieldPath>()
            .map_err(FormError::from)
            .and_then(|parsed| Slot::resolve(&parsed).map(|slot| (parsed, slot)));
        if let Err(err) = &resolved {
            tracing::warn!(path, error = %err, "unresolvable field path");
        }
        resolved
    }

    fn write_slot(&mut self, path: &FieldPath, slot: Slot, raw: &str) -> Result<bool, FormError> {
        match slot.write(&mut self.state, path, raw) {
            Ok(true) => {
                self.commit(path.clone(), ChangeKind::FieldSet);
                Ok(true)
            }
            Ok(false) => {
                tracing::trace!(path = %path, "write left value unchanged");
                Ok(false)
            }
            Err(err) => {
                tracing::warn!(path = %path, error = %err, "rejected field write");
                Err(err)
            }
        }
    }

    fn commit_append(&mut self, collection: CollectionKind, id: EntryId, index: usize) {
        self.commit(collection.path(), ChangeKind::EntryAppended { id, index });
    }

    fn commit(&mut self, path: FieldPath, kind: ChangeKind) {
        self.revision += 1;
        let change = FormChange {
            path,
            kind,
            revision: self.revision,
        };
        let delivered = self.observers.notify(&change, &self.state);
        tracing::debug!(
            path = %change.path,
            kind = ?change.kind,
            revision = change.revision,
            delivered,
            "form state changed"
        );
    }
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new()
    }
}
