//! List materializer
//!
//! Builds the collection value for an item-converted field. Items are already
//! converted; the concrete collection type (`Vec`, `VecDeque`, `HashSet`,
//! `[T; N]`, ...) is produced by the field's generic decode.

use crate::error::{MapperError, MapperResult};
use pathmap_model::{FieldType, SequenceKind, TypeShape};
use serde_json::Value;

/// Materialize `items` for a field of type `target`
///
/// Growable sequences and dynamic types take the items as a list. Fixed-length
/// sequences take them as an array of exactly `items.len()` elements; a length
/// that differs from the declared one fails when the field is decoded.
///
/// # Errors
/// Returns [`MapperError::UnsupportedCollection`] for shapes that cannot hold a
/// sequence of items.
pub fn materialize(target: &FieldType, items: Vec<Value>) -> MapperResult<Value> {
    match target.shape() {
        TypeShape::Sequence(SequenceKind::Growable) | TypeShape::Any => Ok(Value::Array(items)),
        TypeShape::Sequence(SequenceKind::Fixed(len)) => {
            if items.len() != len {
                tracing::debug!(
                    "Materializing {} items for {} (declared length {})",
                    items.len(),
                    target.type_name(),
                    len
                );
            }
            Ok(Value::Array(items))
        }
        _ => Err(MapperError::unsupported_collection(target.type_name())),
    }
}
