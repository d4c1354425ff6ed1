//! Error types for the form store
//!
//! Every store error except [`FormError::Serialization`] and
//! [`FormError::Preview`] is a contract violation by the calling UI code.
//! A rejected operation leaves the store unchanged and usable.

use crate::color::ColorError;
use crate::model::CollectionKind;
use crate::path::PathError;

/// Main store error type
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// Path string could not be parsed
    #[error("invalid path: {0}")]
    InvalidPath(#[from] PathError),

    /// Path names no field of the form
    #[error("unknown field: {path}")]
    UnknownField { path: String },

    /// Path names a record or collection instead of a scalar slot
    #[error("'{path}' addresses a record, not a scalar field")]
    NotAScalar { path: String },

    /// Index past the end of a collection
    #[error("index {index} out of range for '{collection}' (len {len})")]
    IndexOutOfRange {
        collection: CollectionKind,
        index: usize,
        len: usize,
    },

    /// Collection name not known to the form
    #[error("unknown collection: {0}")]
    UnknownCollection(String),

    /// Enum write against a non-enum field
    #[error("'{field}' is not an enum field")]
    NotAnEnum { field: String },

    /// Enum write outside the allowed set
    #[error("invalid value {value:?} for '{field}' (allowed: {allowed})")]
    InvalidEnumValue {
        field: String,
        value: String,
        allowed: String,
    },

    /// Color input that is not a hex color
    #[error("invalid color for '{path}': {source}")]
    InvalidColor {
        path: String,
        #[source]
        source: ColorError,
    },

    /// Date input that is not an ISO date
    #[error("invalid date {value:?} for '{path}'")]
    InvalidDate { path: String, value: String },

    /// Entry defaults do not match the collection's record shape
    #[error("invalid defaults for '{collection}': {source}")]
    InvalidDefaults {
        collection: CollectionKind,
        #[source]
        source: serde_json::Error,
    },

    /// Snapshot serialization failed
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Preview rendering failed
    #[error("preview rendering failed: {0}")]
    Preview(String),
}

impl FormError {
    /// Check if the error is a caller contract violation
    #[inline]
    #[must_use]
    pub fn is_contract_violation(&self) -> bool {
        !matches!(self, Self::Serialization(_) | Self::Preview(_))
    }

    /// Check if the error concerns addressing (path or index)
    #[inline]
    #[must_use]
    pub fn is_addressing(&self) -> bool {
        matches!(
            self,
            Self::InvalidPath(_)
                | Self::UnknownField { .. }
                | Self::NotAScalar { .. }
                | Self::IndexOutOfRange { .. }
                | Self::UnknownCollection(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_error_display() {
        let err = FormError::IndexOutOfRange {
            collection: CollectionKind::Friends,
            index: 3,
            len: 1,
        };
        assert_eq!(err.to_string(), "index 3 out of range for 'friends' (len 1)");
    }

    #[test]
    fn form_error_classification() {
        let path_err = FormError::from(PathError::EmptySegment);
        assert!(path_err.is_contract_violation());
        assert!(path_err.is_addressing());

        let enum_err = FormError::InvalidEnumValue {
            field: "likesTypescript".to_string(),
            value: "MAYBE".to_string(),
            allowed: "YES, NO, YES_AGAIN".to_string(),
        };
        assert!(enum_err.is_contract_violation());
        assert!(!enum_err.is_addressing());

        let preview_err = FormError::Preview("bad utf-8".to_string());
        assert!(!preview_err.is_contract_violation());
    }
}
