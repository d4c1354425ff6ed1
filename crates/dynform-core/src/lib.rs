//! Dynform Core
//!
//! Form state store with repeatable collections and a live JSON preview.
//!
//! # Core Concepts
//!
//! - [`FormStore`]: single source of truth for field values and collections
//! - [`FieldPath`]: dotted/indexed addressing (`friends.2.favorites.color`)
//! - [`EntryId`]: stable identity of a collection entry, independent of index
//! - [`FormState`]: plain serializable snapshot
//! - [`LivePreview`]: JSON rendering kept current through a subscription
//!
//! # Example
//!
//! ```rust
//! use dynform_core::{CollectionKind, FieldValue, FormStore};
//! use serde_json::json;
//!
//! let mut store = FormStore::new();
//! let id = store
//!     .append_entry(CollectionKind::Friends, json!({ "favorites": { "color": "#0000ff" } }))
//!     .unwrap();
//!
//! store.set_field("friends.0.favorites.number", "42").unwrap();
//! assert_eq!(
//!     store.get_field("friends.0.favorites.number").unwrap(),
//!     FieldValue::Number(42.0)
//! );
//!
//! assert_eq!(store.remove_entry(CollectionKind::Friends, 0).unwrap(), id);
//! assert!(store.snapshot().friends.is_empty());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod action;
mod collection;
mod color;
mod config;
mod error;
mod model;
mod observer;
mod path;
mod preview;
mod slot;
mod store;
mod value;

#[cfg(test)]
mod test_support;

// Re-exports
pub use action::{ActionOutcome, ActionScript, FormAction, ScriptError};
pub use collection::{Entry, EntryCollection, EntryId, EntryIdAllocator};
pub use color::{ColorError, HexColor};
pub use config::{ConfigError, FormConfig, FormDefaults, PreviewConfig};
pub use error::FormError;
pub use model::{
    CollectionKind, Favorites, FormState, FriendEntry, LikesTypescript, SkillEntry, UnknownChoice,
};
pub use observer::{ChangeKind, FormChange, ObserverFn, ObserverRegistry, SubscriptionId};
pub use path::{FieldPath, PathError, Segment};
pub use preview::{render_preview, LivePreview};
pub use slot::Slot;
pub use store::FormStore;
pub use value::{coerce_color, coerce_date, coerce_number, FieldKind, FieldValue};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving a form store
    pub use crate::{
        CollectionKind, EntryId, FieldPath, FieldValue, FormAction, FormConfig, FormError,
        FormState, FormStore, FriendEntry, HexColor, LikesTypescript, LivePreview, SkillEntry,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
