//! Error types for the mapping pipelines
//!
//! Provides error handling for:
//! - Shape mismatches (non-object roots, non-object descriptors)
//! - Collection materialization
//! - Field conversion (converters, generic decode, arity mismatch)

use pathmap_model::{ConvertError, DescriptorError, TypeShape};

/// Result alias for mapper operations
pub type MapperResult<T> = Result<T, MapperError>;

/// Main mapper error type
#[derive(Debug, thiserror::Error)]
pub enum MapperError {
    /// Document root is not an object
    #[error("Unexpected token reading {type_name}: expected object, found {found}")]
    UnexpectedToken {
        /// Target type
        type_name: &'static str,
        /// Shape of the supplied root
        found: &'static str,
    },

    /// Descriptor does not describe an object-shaped type
    #[error("{type_name} is not object-shaped ({shape}); only object types can be mapped")]
    NotObjectShaped {
        /// Described type
        type_name: &'static str,
        /// Declared shape
        shape: TypeShape,
    },

    /// No collection can be built for the field type
    #[error("unsupported collection type {type_name} for item conversion")]
    UnsupportedCollection {
        /// Declared field type
        type_name: &'static str,
    },

    /// Converting a field value failed
    #[error("failed to convert field '{field}': {source}")]
    Conversion {
        /// Field being converted
        field: String,
        /// Underlying failure
        #[source]
        source: ConvertError,
    },

    /// Descriptor could not be built
    #[error("descriptor error: {0}")]
    Descriptor(#[from] DescriptorError),

    /// Document text could not be parsed or emitted
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MapperError {
    /// Create unexpected token error
    #[must_use]
    pub fn unexpected_token(type_name: &'static str, found: &'static str) -> Self {
        Self::UnexpectedToken { type_name, found }
    }

    /// Create not-object-shaped error
    #[must_use]
    pub fn not_object_shaped(type_name: &'static str, shape: TypeShape) -> Self {
        Self::NotObjectShaped { type_name, shape }
    }

    /// Create unsupported collection error
    #[must_use]
    pub fn unsupported_collection(type_name: &'static str) -> Self {
        Self::UnsupportedCollection { type_name }
    }

    /// Create conversion error
    pub fn conversion(field: impl Into<String>, source: ConvertError) -> Self {
        Self::Conversion {
            field: field.into(),
            source,
        }
    }

    /// Check if this is a shape error
    #[inline]
    #[must_use]
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedToken { .. } | Self::NotObjectShaped { .. }
        )
    }

    /// Check if this is a conversion error
    #[inline]
    #[must_use]
    pub fn is_conversion_error(&self) -> bool {
        matches!(self, Self::Conversion { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_token_message() {
        let err = MapperError::unexpected_token("SimpleStub", "array");
        assert!(err.to_string().starts_with("Unexpected token"));
        assert!(err.is_shape_error());
        assert!(!err.is_conversion_error());
    }

    #[test]
    fn not_object_shaped_message() {
        let err = MapperError::not_object_shaped("i32", TypeShape::Integer);
        assert_eq!(
            err.to_string(),
            "i32 is not object-shaped (integer); only object types can be mapped"
        );
        assert!(err.is_shape_error());
    }

    #[test]
    fn conversion_names_field() {
        let err = MapperError::conversion("values", ConvertError::custom("boom"));
        assert_eq!(err.to_string(), "failed to convert field 'values': boom");
        assert!(err.is_conversion_error());
    }

    #[test]
    fn unsupported_collection_names_type() {
        let err = MapperError::unsupported_collection("BTreeMap<String, i32>");
        assert!(err.to_string().contains("BTreeMap<String, i32>"));
    }
}
