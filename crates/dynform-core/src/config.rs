//! Store configuration
//!
//! Every field is optional in TOML:
//!
//! ```toml
//! [defaults]
//! likes_typescript = "YES"
//! friend_color = "#0000ff"
//!
//! [preview]
//! indent = 2
//! ```

use crate::color::HexColor;
use crate::model::LikesTypescript;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration of a [`FormStore`](crate::FormStore)
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormConfig {
    /// Initial values and entry defaults
    pub defaults: FormDefaults,
    /// Live preview rendering
    pub preview: PreviewConfig,
}

impl FormConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With initial radio choice
    #[inline]
    #[must_use]
    pub fn with_likes_typescript(mut self, choice: LikesTypescript) -> Self {
        self.defaults.likes_typescript = choice;
        self
    }

    /// With favorite color of newly added friends
    #[inline]
    #[must_use]
    pub fn with_friend_color(mut self, color: HexColor) -> Self {
        self.defaults.friend_color = color;
        self
    }

    /// With preview indent width
    #[inline]
    #[must_use]
    pub fn with_preview_indent(mut self, indent: usize) -> Self {
        self.preview.indent = indent;
        self
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    /// Returns error on malformed TOML, unknown keys or invalid values
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded form config");
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.preview.indent > PreviewConfig::MAX_INDENT {
            return Err(ConfigError::Invalid(format!(
                "preview.indent must be at most {}, got {}",
                PreviewConfig::MAX_INDENT,
                self.preview.indent
            )));
        }
        Ok(())
    }
}

/// Initial values and entry defaults
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormDefaults {
    /// Initial value of `likesTypescript`
    pub likes_typescript: LikesTypescript,
    /// Favorite color given to friends added without explicit defaults
    pub friend_color: HexColor,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            likes_typescript: LikesTypescript::Yes,
            friend_color: HexColor::BLUE,
        }
    }
}

/// Preview rendering options
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewConfig {
    /// Spaces per nesting level; `0` renders compact JSON
    pub indent: usize,
}

impl PreviewConfig {
    /// Largest accepted indent
    pub const MAX_INDENT: usize = 8;
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML did not match the expected shape
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Parsed values out of range
    #[error("invalid config: {0}")]
    Invalid(String),
}
