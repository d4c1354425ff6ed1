//! Serialized store operations and action scripts
//!
//! A [`FormAction`] is one user interaction as a renderer would forward it.
//! Scripts are plain lists of actions, written in JSON or YAML:
//!
//! ```yaml
//! actions:
//!   - op: append_entry
//!     collection: friends
//!     defaults: { favorites: { color: "#0000ff" } }
//!   - op: set_field
//!     path: friends.0.favorites.number
//!     value: "42"
//! ```

use crate::collection::EntryId;
use crate::model::CollectionKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One store operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum FormAction {
    /// Write raw control input at a path
    SetField {
        path: String,
        #[serde(deserialize_with = "raw_input")]
        value: String,
    },
    /// Constrained write to an enum field
    SetEnum {
        field: String,
        #[serde(deserialize_with = "raw_input")]
        value: String,
    },
    /// Append an entry built from defaults
    AppendEntry {
        collection: CollectionKind,
        #[serde(default)]
        defaults: serde_json::Value,
    },
    /// Remove the entry at an index
    RemoveEntry { collection: CollectionKind, index: usize },
}

/// Accept any scalar as control input: numbers and booleans are written
/// the way a text box would hold them, null clears
fn raw_input<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    use serde::de::Error;
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => Ok(text),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(D::Error::custom(format!(
            "expected a scalar control value, found {other}"
        ))),
    }
}

impl FormAction {
    /// Check if the action changes collection structure
    #[inline]
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::AppendEntry { .. } | Self::RemoveEntry { .. })
    }
}

/// Result of applying one action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Field write; `true` if the value changed
    Written(bool),
    /// New entry identity
    Appended(EntryId),
    /// Identity of the removed entry
    Removed(EntryId),
}

/// Ordered list of actions
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionScript {
    pub actions: Vec<FormAction>,
}

impl ActionScript {
    /// Parse a JSON script
    ///
    /// # Errors
    /// Returns error if the text is not a valid script
    pub fn from_json_str(text: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parse a YAML script
    ///
    /// # Errors
    /// Returns error if the text is not a valid script
    pub fn from_yaml_str(text: &str) -> Result<Self, ScriptError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load a script, choosing the format by extension
    /// (`.json`, `.yaml`, `.yml`)
    ///
    /// # Errors
    /// Returns error if the file cannot be read, has an unknown extension,
    /// or does not parse
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let text = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match extension.as_deref() {
            Some("json") => Self::from_json_str(&text),
            Some("yaml" | "yml") => Self::from_yaml_str(&text),
            _ => Err(ScriptError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Number of actions
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Check if the script has no actions
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Script loading errors
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// File could not be read
    #[error("failed to read script {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Extension is not json/yaml/yml
    #[error("unsupported script format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// Invalid JSON script
    #[error("invalid JSON script: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid YAML script
    #[error("invalid YAML script: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
