//! Write pipeline
//!
//! [`MappedSerialize`] emits an instance as an object, one member per eligible
//! field in declaration order. It is a plain [`Serialize`] value, so output can
//! go to any serde serializer.

use crate::config::MapperConfig;
use crate::context;
use crate::error::{MapperError, MapperResult};
use pathmap_model::{node_kind, ConvertError, FieldDescriptor, TypeDescriptor};
use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::sync::Arc;

/// Serializable view of an optional instance through its descriptor
pub struct MappedSerialize<'a, T> {
    value: Option<&'a T>,
    descriptor: Arc<TypeDescriptor<T>>,
    config: Arc<MapperConfig>,
}

impl<'a, T> MappedSerialize<'a, T> {
    /// Create view
    #[must_use]
    pub fn new(
        value: Option<&'a T>,
        descriptor: Arc<TypeDescriptor<T>>,
        config: Arc<MapperConfig>,
    ) -> Self {
        Self {
            value,
            descriptor,
            config,
        }
    }
}

impl<T> Serialize for MappedSerialize<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Some(instance) = self.value else {
            return serializer.serialize_unit();
        };

        if !self.descriptor.is_object_shaped() {
            return Err(S::Error::custom(MapperError::not_object_shaped(
                self.descriptor.type_name(),
                self.descriptor.shape(),
            )));
        }

        let _guard = context::enter(Arc::clone(&self.config));
        tracing::debug!("Writing {}", self.descriptor.type_name());

        let mut map = serializer.serialize_map(None)?;
        for field in self.descriptor.fields() {
            if let Some(node) = write_field(instance, field, &self.config).map_err(S::Error::custom)? {
                map.serialize_entry(self.config.member_name(field).as_ref(), &node)?;
            }
        }
        map.end()
    }
}

/// Emitted value for one field, or `None` if the field is skipped
///
/// # Errors
/// Returns [`MapperError::Conversion`] if encoding or a write converter fails.
pub fn write_field<T>(
    instance: &T,
    field: &FieldDescriptor<T>,
    config: &MapperConfig,
) -> MapperResult<Option<Value>> {
    if !field.is_readable() {
        return Ok(None);
    }
    if field.is_ignored() && !field.is_projected() {
        return Ok(None);
    }
    if !field.should_serialize(instance) {
        return Ok(None);
    }

    let conversion = |e| MapperError::conversion(field.name(), e);
    let current = field.get(instance).map_err(conversion)?;

    if current.is_null() && config.null_value_handling_for(field).ignores() {
        tracing::trace!("Omitted null '{}'", field.name());
        return Ok(None);
    }

    // A null value equals the zero value of a nullable field
    if config.default_value_handling_for(field).ignores()
        && current == field.effective_default().map_err(conversion)?
    {
        tracing::trace!("Omitted default '{}'", field.name());
        return Ok(None);
    }

    if current.is_null() {
        return Ok(Some(Value::Null));
    }

    if let Some(converter) = field.converter().filter(|c| c.can_write()) {
        return converter.write_value(&current).map(Some).map_err(conversion);
    }

    if field.field_type().is_collection() {
        if let Some(converter) = field.item_converter().filter(|c| c.can_write()) {
            let Value::Array(items) = &current else {
                return Err(conversion(ConvertError::unexpected_node(
                    "array",
                    node_kind(&current),
                )));
            };
            let converted = items
                .iter()
                .map(|item| converter.write_value(item))
                .collect::<Result<Vec<_>, _>>()
                .map_err(conversion)?;
            return Ok(Some(Value::Array(converted)));
        }
    }

    Ok(Some(current))
}
