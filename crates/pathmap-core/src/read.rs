//! Read pipeline
//!
//! Populates an instance from a document root in two passes: projected fields
//! are resolved against the root and assigned first, then every remaining field
//! is mapped structurally by member name. Projected fields are tracked in a
//! call-scoped exclusion set so the cached descriptor is never mutated.

use crate::config::MapperConfig;
use crate::error::{MapperError, MapperResult};
use crate::materialize::materialize;
use crate::policy;
use pathmap_model::{node_kind, ConvertError, FieldDescriptor, TypeDescriptor};
use pathmap_query::resolve;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Populate `target` from `root`
///
/// # Errors
/// - [`MapperError::NotObjectShaped`] if the descriptor is not object-shaped
/// - [`MapperError::UnexpectedToken`] if `root` is not an object
/// - [`MapperError::Conversion`] / [`MapperError::UnsupportedCollection`] from
///   field conversion
pub fn read_into<T>(
    root: &Value,
    target: &mut T,
    descriptor: &TypeDescriptor<T>,
    config: &MapperConfig,
) -> MapperResult<()> {
    if !descriptor.is_object_shaped() {
        return Err(MapperError::not_object_shaped(
            descriptor.type_name(),
            descriptor.shape(),
        ));
    }

    let Value::Object(members) = root else {
        return Err(MapperError::unexpected_token(
            descriptor.type_name(),
            node_kind(root),
        ));
    };

    tracing::debug!(
        "Reading {} from object with {} members",
        descriptor.type_name(),
        members.len()
    );

    let mut excluded = HashSet::new();
    for (index, field) in descriptor.projected_fields() {
        excluded.insert(index);
        project(root, target, field, config)?;
    }

    for (index, field) in descriptor.fields().iter().enumerate() {
        if excluded.contains(&index) || field.is_ignored() || !field.is_writable() {
            continue;
        }
        populate_plain(members, target, field, config)?;
    }

    Ok(())
}

fn project<T>(
    root: &Value,
    target: &mut T,
    field: &FieldDescriptor<T>,
    config: &MapperConfig,
) -> MapperResult<()> {
    let Some(query) = field.query() else {
        return Ok(());
    };

    let token = resolve(root, query);
    tracing::trace!(
        "Projecting '{}' from '{}' ({} match(es))",
        field.name(),
        query.source(),
        token.match_count()
    );

    let candidate = match token.into_node() {
        Some(node) => convert(node.as_ref(), target, field)?,
        None => Value::Null,
    };

    policy::assign(target, field, candidate, config)
}

fn populate_plain<T>(
    members: &Map<String, Value>,
    target: &mut T,
    field: &FieldDescriptor<T>,
    config: &MapperConfig,
) -> MapperResult<()> {
    let name = config.member_name(field);

    match lookup(members, &name) {
        Some(node) => {
            let candidate = convert(node, target, field)?;
            policy::assign(target, field, candidate, config)
        }
        None if config.default_value_handling_for(field).populates() => {
            policy::assign(target, field, Value::Null, config)
        }
        None => Ok(()),
    }
}

/// Exact member match first, then case-insensitive
fn lookup<'a>(members: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    members.get(name).or_else(|| {
        members
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    })
}

/// Convert a resolved node into the candidate value for `field`
fn convert<T>(node: &Value, target: &T, field: &FieldDescriptor<T>) -> MapperResult<Value> {
    if let Some(converter) = field.converter().filter(|c| c.can_read()) {
        let existing = field
            .existing(target)
            .map_err(|e| MapperError::conversion(field.name(), e))?;
        return converter
            .read_value(node, field.field_type(), existing.as_ref())
            .map_err(|e| MapperError::conversion(field.name(), e));
    }

    if field.field_type().is_collection() {
        if let Some(converter) = field.item_converter().filter(|c| c.can_read()) {
            let Value::Array(items) = node else {
                return Err(MapperError::conversion(
                    field.name(),
                    ConvertError::unexpected_node("array", node_kind(node)),
                ));
            };

            let converted = items
                .iter()
                .map(|item| converter.read_value(item, field.field_type(), None))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| MapperError::conversion(field.name(), e))?;

            return materialize(field.field_type(), converted);
        }
    }

    Ok(node.clone())
}
