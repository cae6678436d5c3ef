//! Value assignment policy
//!
//! Every assignment made by the read pipeline, projected or plain, goes through
//! [`assign`]. Null candidates are resolved in a fixed order:
//!
//! 1. effective default handling includes `Populate` → declared default
//! 2. still null and effective null handling is `Ignore` → skip
//! 3. still null and the field is not nullable → the type's zero value
//! 4. otherwise assign null
//!
//! Non-null candidates are assigned directly. Fields that are not writable are
//! never touched.

use crate::config::MapperConfig;
use crate::error::{MapperError, MapperResult};
use pathmap_model::FieldDescriptor;
use serde_json::Value;

/// Outcome of resolving one candidate value
#[derive(Debug, Clone, PartialEq)]
pub enum Assignment {
    /// Leave the field untouched
    Skip,

    /// Decode and assign this value
    Assign(Value),

    /// Assign the declared type's zero value
    Zero,
}

/// Decide what to assign for `candidate`
#[must_use]
pub fn resolve_assignment<T>(
    field: &FieldDescriptor<T>,
    candidate: Value,
    config: &MapperConfig,
) -> Assignment {
    if !field.is_writable() {
        return Assignment::Skip;
    }

    let mut candidate = candidate;
    if candidate.is_null() && config.default_value_handling_for(field).populates() {
        if let Some(default) = field.default_value() {
            candidate = default.clone();
        }
    }

    if !candidate.is_null() {
        return Assignment::Assign(candidate);
    }

    if config.null_value_handling_for(field).ignores() {
        Assignment::Skip
    } else if field.field_type().is_nullable() {
        Assignment::Assign(Value::Null)
    } else {
        Assignment::Zero
    }
}

/// Assign `candidate` to `field` on `target` following the policy
///
/// # Errors
/// Returns [`MapperError::Conversion`] if the value does not decode into the
/// field's declared type.
pub fn assign<T>(
    target: &mut T,
    field: &FieldDescriptor<T>,
    candidate: Value,
    config: &MapperConfig,
) -> MapperResult<()> {
    match resolve_assignment(field, candidate, config) {
        Assignment::Skip => {
            tracing::trace!("Skipped assignment of '{}'", field.name());
            Ok(())
        }
        Assignment::Zero => {
            tracing::trace!("Assigned zero value to '{}'", field.name());
            field.reset(target);
            Ok(())
        }
        Assignment::Assign(value) => field
            .set(target, value)
            .map_err(|e| MapperError::conversion(field.name(), e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathmap_model::{DefaultValueHandling, NullValueHandling};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[derive(Debug, Default)]
    struct Stub {
        count: i32,
        label: Option<String>,
    }

    fn count() -> FieldDescriptor<Stub> {
        FieldDescriptor::new("count", |s: &Stub| &s.count, |s: &mut Stub| &mut s.count)
    }

    fn label() -> FieldDescriptor<Stub> {
        FieldDescriptor::new("label", |s: &Stub| &s.label, |s: &mut Stub| &mut s.label)
    }

    #[test]
    fn non_null_is_assigned() {
        let config = MapperConfig::new();
        assert_eq!(
            resolve_assignment(&count(), json!(5), &config),
            Assignment::Assign(json!(5))
        );
    }

    #[test]
    fn null_on_non_nullable_is_zero() {
        let config = MapperConfig::new();
        assert_eq!(resolve_assignment(&count(), Value::Null, &config), Assignment::Zero);
    }

    #[test]
    fn null_on_nullable_is_null() {
        let config = MapperConfig::new();
        assert_eq!(
            resolve_assignment(&label(), Value::Null, &config),
            Assignment::Assign(Value::Null)
        );
    }

    #[test]
    fn populate_uses_declared_default() {
        let config = MapperConfig::new().with_default_value_handling(DefaultValueHandling::Populate);
        let field = count().with_default(json!(42));
        assert_eq!(
            resolve_assignment(&field, Value::Null, &config),
            Assignment::Assign(json!(42))
        );
    }

    #[test]
    fn populate_without_default_falls_through() {
        let config = MapperConfig::new().with_default_value_handling(DefaultValueHandling::Populate);
        assert_eq!(resolve_assignment(&count(), Value::Null, &config), Assignment::Zero);
    }

    #[test]
    fn default_ignored_without_populate() {
        let config = MapperConfig::new();
        let field = count().with_default(json!(42));
        assert_eq!(resolve_assignment(&field, Value::Null, &config), Assignment::Zero);
    }

    #[test]
    fn null_ignore_skips() {
        let field = label().with_null_value_handling(NullValueHandling::Ignore);
        assert_eq!(
            resolve_assignment(&field, Value::Null, &MapperConfig::new()),
            Assignment::Skip
        );
    }

    #[test]
    fn populate_wins_over_null_ignore() {
        let field = count()
            .with_default(json!(7))
            .with_default_value_handling(DefaultValueHandling::IgnoreAndPopulate)
            .with_null_value_handling(NullValueHandling::Ignore);
        assert_eq!(
            resolve_assignment(&field, Value::Null, &MapperConfig::new()),
            Assignment::Assign(json!(7))
        );
    }

    #[test]
    fn read_only_field_is_skipped() {
        let field = count().with_writable(false);
        assert_eq!(
            resolve_assignment(&field, json!(1), &MapperConfig::new()),
            Assignment::Skip
        );
    }

    #[test]
    fn assign_applies_outcome() {
        let config = MapperConfig::new();
        let mut stub = Stub {
            count: 9,
            label: Some("x".into()),
        };

        assign(&mut stub, &count(), Value::Null, &config).unwrap();
        assert_eq!(stub.count, 0);

        assign(&mut stub, &label(), Value::Null, &config).unwrap();
        assert_eq!(stub.label, None);

        assign(&mut stub, &count(), json!(3), &config).unwrap();
        assert_eq!(stub.count, 3);
    }

    #[test]
    fn decode_failure_is_conversion_error() {
        let mut stub = Stub::default();
        let err = assign(&mut stub, &count(), json!([1, 2]), &MapperConfig::new()).unwrap_err();
        assert!(matches!(err, MapperError::Conversion { ref field, .. } if field == "count"));
    }
}
