//! Typed field values and input coercion
//!
//! Controls hand the store raw text; [`FieldKind`] decides how that text
//! becomes a stored value.

use crate::color::HexColor;
use crate::model::LikesTypescript;
use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// Declared kind of a scalar slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Free text, stored verbatim
    Text,
    /// Finite number; unparseable input is absent
    Number,
    /// `#rrggbb` color
    Color,
    /// ISO calendar date
    Date,
    /// One of a fixed set of values
    Choice,
}

/// Current value of a scalar slot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    #[serde(serialize_with = "serialize_number")]
    Number(f64),
    Color(HexColor),
    Date(NaiveDate),
    Choice(LikesTypescript),
    /// Never set, cleared, or unparseable numeric input
    Absent,
}

impl FieldValue {
    /// Check if the slot holds no value
    #[inline]
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Text content, if this is a text value
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Number, if this is a numeric value
    #[inline]
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Color, if this is a color value
    #[inline]
    #[must_use]
    pub fn as_color(&self) -> Option<HexColor> {
        match self {
            Self::Color(color) => Some(*color),
            _ => None,
        }
    }

    /// Display form used by text controls (`""` when absent)
    #[must_use]
    pub fn to_input_string(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(n) => n.to_string(),
            Self::Color(color) => color.to_string(),
            Self::Date(date) => date.format("%Y-%m-%d").to_string(),
            Self::Choice(choice) => choice.as_str().to_string(),
            Self::Absent => String::new(),
        }
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Absent, Self::Text)
    }
}

impl From<Option<f64>> for FieldValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Absent, Self::Number)
    }
}

impl From<Option<HexColor>> for FieldValue {
    fn from(value: Option<HexColor>) -> Self {
        value.map_or(Self::Absent, Self::Color)
    }
}

impl From<Option<NaiveDate>> for FieldValue {
    fn from(value: Option<NaiveDate>) -> Self {
        value.map_or(Self::Absent, Self::Date)
    }
}

/// 2^63, first integral `f64` outside the `i64` range
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;
/// 2^64, first integral `f64` outside the `u64` range
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// Serialize a number in its shortest JSON form: integral values
/// carry no fraction
///
/// Integral values are written as plain digits across the `u64`/`i64`
/// range. Beyond it serde_json values cannot hold an integer, so those
/// fall back to exponent form (`1e20`).
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::trivially_copy_pass_by_ref
)]
pub(crate) fn serialize_number<S: Serializer>(n: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    let n = *n;
    if n.fract() != 0.0 {
        return serializer.serialize_f64(n);
    }
    if (-I64_LIMIT..I64_LIMIT).contains(&n) {
        serializer.serialize_i64(n as i64)
    } else if (0.0..U64_LIMIT).contains(&n) {
        serializer.serialize_u64(n as u64)
    } else {
        serializer.serialize_f64(n)
    }
}

/// Coerce numeric input
///
/// Empty, unparseable and non-finite input (`NaN`, `inf`) all yield `None`.
#[must_use]
pub fn coerce_number(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// Coerce color input; empty input clears the color
///
/// # Errors
/// Returns error if non-empty input is not a valid hex color
pub fn coerce_color(raw: &str) -> Result<Option<HexColor>, crate::ColorError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    HexColor::parse(raw).map(Some)
}

/// Coerce date input (`YYYY-MM-DD`); empty input clears the date
///
/// # Errors
/// Returns the chrono parse error for non-empty input that is not an ISO date
pub fn coerce_date(raw: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_parses_trimmed() {
        assert_eq!(coerce_number(" 42 "), Some(42.0));
        assert_eq!(coerce_number("-1.5"), Some(-1.5));
    }

    #[test]
    fn number_absent_for_garbage() {
        assert_eq!(coerce_number(""), None);
        assert_eq!(coerce_number("forty-two"), None);
        assert_eq!(coerce_number("NaN"), None);
        assert_eq!(coerce_number("inf"), None);
    }

    #[test]
    fn color_empty_clears() {
        assert_eq!(coerce_color("").unwrap(), None);
        assert_eq!(coerce_color("#FF0000").unwrap(), Some(HexColor::from_rgb(255, 0, 0)));
        assert!(coerce_color("red").is_err());
    }

    #[test]
    fn date_iso_only() {
        assert_eq!(
            coerce_date("2001-02-03").unwrap(),
            NaiveDate::from_ymd_opt(2001, 2, 3)
        );
        assert_eq!(coerce_date("").unwrap(), None);
        assert!(coerce_date("03/02/2001").is_err());
        assert!(coerce_date("2001-02-30").is_err());
    }

    #[test]
    fn field_value_json() {
        assert_eq!(serde_json::to_value(FieldValue::Absent).unwrap(), serde_json::Value::Null);
        assert_eq!(
            serde_json::to_value(FieldValue::Choice(LikesTypescript::YesAgain)).unwrap(),
            serde_json::json!("YES_AGAIN")
        );
        assert_eq!(
            serde_json::to_value(FieldValue::Color(HexColor::BLUE)).unwrap(),
            serde_json::json!("#0000ff")
        );
    }

    #[test]
    fn integral_numbers_print_without_fraction() {
        assert_eq!(serde_json::to_string(&FieldValue::Number(42.0)).unwrap(), "42");
        assert_eq!(serde_json::to_string(&FieldValue::Number(-0.5)).unwrap(), "-0.5");
        assert_eq!(serde_json::to_string(&FieldValue::Number(0.25)).unwrap(), "0.25");
    }

    #[test]
    fn large_integers_print_as_digits() {
        // above 2^53 but still exact in f64
        assert_eq!(
            serde_json::to_string(&FieldValue::Number(1e18)).unwrap(),
            "1000000000000000000"
        );
        assert_eq!(
            serde_json::to_string(&FieldValue::Number(-1e18)).unwrap(),
            "-1000000000000000000"
        );
        // past i64, inside u64
        assert_eq!(
            serde_json::to_string(&FieldValue::Number(1e19)).unwrap(),
            "10000000000000000000"
        );
        assert_eq!(
            serde_json::to_value(FieldValue::Number(1e19)).unwrap(),
            serde_json::json!(10_000_000_000_000_000_000_u64)
        );
    }

    #[test]
    fn input_string_round_trip() {
        let date = FieldValue::Date(NaiveDate::from_ymd_opt(1999, 12, 31).unwrap());
        assert_eq!(date.to_input_string(), "1999-12-31");
        assert_eq!(FieldValue::Number(42.0).to_input_string(), "42");
        assert_eq!(FieldValue::Absent.to_input_string(), "");
    }
}
