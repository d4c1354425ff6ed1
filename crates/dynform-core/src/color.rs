//! Hex color values
//!
//! [`HexColor`] is the single representation of a favorite color. Every
//! input surface (native color input, popover picker, entry defaults)
//! parses through [`HexColor::parse`], so all of them converge on the
//! canonical lowercase `#rrggbb` form.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// A 24-bit RGB color, displayed as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor([u8; 3]);

impl HexColor {
    /// Pure blue, the default favorite color of a new friend
    pub const BLUE: Self = Self([0x00, 0x00, 0xff]);

    /// Create color from channels
    #[inline]
    #[must_use]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Red, green and blue channels
    #[inline]
    #[must_use]
    pub const fn rgb(&self) -> [u8; 3] {
        self.0
    }

    /// Parse `#rrggbb` (any case) or the `#rgb` shorthand
    ///
    /// # Errors
    /// Returns error if the leading `#` is missing or the digits are not
    /// three or six hex characters
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let digits = input
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(input.to_string()))?;

        let expanded: String = match digits.len() {
            6 => digits.to_string(),
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            _ => return Err(ColorError::InvalidLength(input.to_string())),
        };

        let bytes =
            hex::decode(&expanded).map_err(|_| ColorError::InvalidDigits(input.to_string()))?;
        let mut rgb = [0u8; 3];
        rgb.copy_from_slice(&bytes);
        Ok(Self(rgb))
    }
}

impl Display for HexColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", hex::encode(self.0))
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

/// Errors from color parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    /// Input does not start with `#`
    #[error("color must start with '#': {0:?}")]
    MissingHash(String),

    /// Wrong number of digits
    #[error("color must have 3 or 6 hex digits: {0:?}")]
    InvalidLength(String),

    /// Non-hex characters
    #[error("color contains non-hex digits: {0:?}")]
    InvalidDigits(String),
}
