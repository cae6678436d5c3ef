//! Error types for the descriptor model
//!
//! Provides error handling for:
//! - Descriptor construction (invalid queries, duplicate members)
//! - Value conversion (converters and generic decode)

use pathmap_query::QueryError;
use std::fmt::Display;

/// Errors while building a type descriptor
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    /// Query expression failed to parse
    #[error("query error: {0}")]
    Query(#[from] QueryError),

    /// Two fields share the same member name
    #[error("duplicate field '{field}' on {type_name}")]
    DuplicateField {
        /// Owning type
        type_name: &'static str,
        /// Member name declared twice
        field: String,
    },
}

impl DescriptorError {
    /// Create duplicate field error
    pub fn duplicate_field(type_name: &'static str, field: impl Into<String>) -> Self {
        Self::DuplicateField {
            type_name,
            field: field.into(),
        }
    }
}

/// Errors while converting a document node into a field value or back
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Generic serde decode/encode failed
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Node has the wrong shape for the requested conversion
    #[error("expected {expected} node, found {found}")]
    UnexpectedNode {
        /// Shape the conversion needs
        expected: &'static str,
        /// Shape that was supplied
        found: &'static str,
    },

    /// Converter-specific failure
    #[error("{0}")]
    Custom(String),
}

impl ConvertError {
    /// Create converter-specific error
    pub fn custom(message: impl Display) -> Self {
        Self::Custom(message.to_string())
    }

    /// Create unexpected node error
    #[must_use]
    pub fn unexpected_node(expected: &'static str, found: &'static str) -> Self {
        Self::UnexpectedNode { expected, found }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_field_display() {
        let err = DescriptorError::duplicate_field("Stub", "value");
        assert_eq!(err.to_string(), "duplicate field 'value' on Stub");
    }

    #[test]
    fn query_error_converts() {
        let err: DescriptorError = QueryError::invalid_expression("a[", "bad").into();
        assert!(matches!(err, DescriptorError::Query(_)));
    }

    #[test]
    fn unexpected_node_display() {
        let err = ConvertError::unexpected_node("array", "string");
        assert_eq!(err.to_string(), "expected array node, found string");
    }

    #[test]
    fn custom_display() {
        assert_eq!(ConvertError::custom("nope").to_string(), "nope");
    }
}
