//! Mapper facade
//!
//! [`PathMapper`] ties the descriptor cache, configuration, and both pipelines
//! together. The `read_*`/`write_*` entry points are gated on
//! [`PathMapper::supports`]: types without projected fields go through plain
//! `serde_json`.

use crate::config::MapperConfig;
use crate::context;
use crate::error::MapperResult;
use crate::read::read_into;
use crate::write::MappedSerialize;
use pathmap_model::{DescriptorCache, PathMapped, TypeDescriptor};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Query-projected object mapper
#[derive(Debug, Clone)]
pub struct PathMapper {
    config: Arc<MapperConfig>,
    cache: &'static DescriptorCache,
}

impl Default for PathMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl PathMapper {
    /// Create mapper with default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MapperConfig::default())
    }

    /// Create mapper with configuration
    #[must_use]
    pub fn with_config(config: MapperConfig) -> Self {
        Self {
            config: Arc::new(config),
            cache: DescriptorCache::global(),
        }
    }

    /// Mapper for the call in progress on this thread
    ///
    /// Uses the configuration of the innermost active read or write, or the
    /// default configuration outside of one.
    #[must_use]
    pub fn current() -> Self {
        match context::active() {
            Some(config) => Self {
                config,
                cache: DescriptorCache::global(),
            },
            None => Self::new(),
        }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Cached descriptor for `T`
    ///
    /// # Errors
    /// Returns [`MapperError::Descriptor`](crate::MapperError::Descriptor) if the
    /// descriptor cannot be built.
    pub fn describe<T: PathMapped>(&self) -> MapperResult<Arc<TypeDescriptor<T>>> {
        Ok(self.cache.describe::<T>()?)
    }

    /// Check if `T` has at least one projected field
    #[must_use]
    pub fn supports<T: PathMapped>(&self) -> bool {
        self.cache.supports::<T>()
    }

    /// Read a fresh `T` from `root` through the read pipeline
    ///
    /// # Errors
    /// Returns shape, conversion, and descriptor errors from the pipeline.
    pub fn read<T: PathMapped>(&self, root: &Value) -> MapperResult<T> {
        let descriptor = self.describe::<T>()?;
        let mut target = descriptor.create();
        self.run_read(root, &mut target, &descriptor)?;
        Ok(target)
    }

    /// Populate an existing `target` from `root` through the read pipeline
    ///
    /// Fields the document does not touch keep their current values.
    ///
    /// # Errors
    /// Returns shape, conversion, and descriptor errors from the pipeline.
    pub fn populate<T: PathMapped>(&self, root: &Value, target: &mut T) -> MapperResult<()> {
        let descriptor = self.describe::<T>()?;
        self.run_read(root, target, &descriptor)
    }

    /// Serializable view of `value` through the write pipeline
    ///
    /// # Errors
    /// Returns [`MapperError::Descriptor`](crate::MapperError::Descriptor) if the
    /// descriptor cannot be built.
    pub fn serializer<'a, T: PathMapped>(
        &self,
        value: Option<&'a T>,
    ) -> MapperResult<MappedSerialize<'a, T>> {
        Ok(MappedSerialize::new(
            value,
            self.describe::<T>()?,
            Arc::clone(&self.config),
        ))
    }

    /// Write `value` to a document through the write pipeline
    ///
    /// # Errors
    /// Returns shape, conversion, and descriptor errors from the pipeline.
    pub fn write<T: PathMapped>(&self, value: Option<&T>) -> MapperResult<Value> {
        Ok(serde_json::to_value(self.serializer(value)?)?)
    }

    /// Read `T` from document text
    ///
    /// An empty or whitespace-only body yields `Ok(None)`.
    ///
    /// # Errors
    /// Returns [`MapperError::Json`](crate::MapperError::Json) for malformed text,
    /// otherwise as [`read_value`](Self::read_value).
    pub fn read_str<T>(&self, body: &str) -> MapperResult<Option<T>>
    where
        T: PathMapped + DeserializeOwned,
    {
        if body.trim().is_empty() {
            tracing::debug!("Empty body for {}", std::any::type_name::<T>());
            return Ok(None);
        }

        let root: Value = serde_json::from_str(body)?;
        self.read_value(&root).map(Some)
    }

    /// Read `T` from a document
    ///
    /// # Errors
    /// Returns pipeline errors for supported types, decode errors otherwise.
    pub fn read_value<T>(&self, root: &Value) -> MapperResult<T>
    where
        T: PathMapped + DeserializeOwned,
    {
        if self.supports::<T>() {
            return self.read(root);
        }

        let _guard = context::enter(Arc::clone(&self.config));
        Ok(T::deserialize(root)?)
    }

    /// Write `value` to a document
    ///
    /// # Errors
    /// Returns pipeline errors for supported types, encode errors otherwise.
    pub fn write_value<T>(&self, value: Option<&T>) -> MapperResult<Value>
    where
        T: PathMapped + Serialize,
    {
        if self.supports::<T>() {
            return self.write(value);
        }

        let _guard = context::enter(Arc::clone(&self.config));
        Ok(serde_json::to_value(value)?)
    }

    /// Write `value` to document text
    ///
    /// # Errors
    /// As [`write_value`](Self::write_value).
    pub fn write_string<T>(&self, value: Option<&T>) -> MapperResult<String>
    where
        T: PathMapped + Serialize,
    {
        if self.supports::<T>() {
            return Ok(serde_json::to_string(&self.serializer(value)?)?);
        }

        let _guard = context::enter(Arc::clone(&self.config));
        Ok(serde_json::to_string(&value)?)
    }

    fn run_read<T: PathMapped>(
        &self,
        root: &Value,
        target: &mut T,
        descriptor: &TypeDescriptor<T>,
    ) -> MapperResult<()> {
        let _guard = context::enter(Arc::clone(&self.config));
        read_into(root, target, descriptor, &self.config)
    }
}

/// Implement `Serialize` and `Deserialize` for a [`PathMapped`] type through
/// [`PathMapper::current`]
///
/// Nested mapped types and pass-through (`$`) projections rely on this: when a
/// field of such a type is decoded or encoded generically, it re-enters the
/// pipelines with the active configuration, rooted at the nested document.
///
/// # Example
///
/// ```rust
/// use pathmap_core::{impl_path_mapped_serde, PathMapper};
/// use pathmap_model::{DescriptorError, FieldDescriptor, PathMapped, TypeDescriptor};
/// use serde_json::json;
///
/// #[derive(Debug, Default)]
/// struct Stub {
///     value: i32,
/// }
///
/// impl PathMapped for Stub {
///     fn describe() -> Result<TypeDescriptor<Self>, DescriptorError> {
///         TypeDescriptor::builder(Stub::default)
///             .field(
///                 FieldDescriptor::new("value", |s: &Stub| &s.value, |s: &mut Stub| &mut s.value)
///                     .with_query("main.nested.value")?,
///             )
///             .build()
///     }
/// }
///
/// impl_path_mapped_serde!(Stub);
///
/// let stub: Stub = serde_json::from_value(json!({ "main": { "nested": { "value": 3 } } })).unwrap();
/// assert_eq!(stub.value, 3);
/// ```
#[macro_export]
macro_rules! impl_path_mapped_serde {
    ($ty:ty) => {
        impl $crate::__private::serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                let mapped = $crate::PathMapper::current()
                    .serializer(::core::option::Option::Some(self))
                    .map_err(<S::Error as $crate::__private::serde::ser::Error>::custom)?;
                $crate::__private::serde::Serialize::serialize(&mapped, serializer)
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                let root: $crate::__private::Value =
                    $crate::__private::serde::Deserialize::deserialize(deserializer)?;
                $crate::PathMapper::current()
                    .read::<$ty>(&root)
                    .map_err(<D::Error as $crate::__private::serde::de::Error>::custom)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NamingPolicy;
    use pathmap_model::{DescriptorError, FieldDescriptor};
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq)]
    struct Projected {
        value: i32,
        main_value: i32,
    }

    impl PathMapped for Projected {
        fn describe() -> Result<TypeDescriptor<Self>, DescriptorError> {
            TypeDescriptor::builder(Projected::default)
                .field(
                    FieldDescriptor::new("value", |s: &Projected| &s.value, |s: &mut Projected| {
                        &mut s.value
                    })
                    .with_query("main.nested.value")?,
                )
                .field(FieldDescriptor::new(
                    "main_value",
                    |s: &Projected| &s.main_value,
                    |s: &mut Projected| &mut s.main_value,
                ))
                .build()
        }
    }

    crate::impl_path_mapped_serde!(Projected);

    #[derive(Debug, Default, PartialEq, Deserialize, serde::Serialize)]
    struct Plain {
        #[serde(rename = "other")]
        value: i32,
    }

    impl PathMapped for Plain {
        fn describe() -> Result<TypeDescriptor<Self>, DescriptorError> {
            TypeDescriptor::builder(Plain::default)
                .field(FieldDescriptor::new(
                    "value",
                    |s: &Plain| &s.value,
                    |s: &mut Plain| &mut s.value,
                ))
                .build()
        }
    }

    #[test]
    fn read_str_empty_body_is_none() {
        let mapper = PathMapper::new();
        assert_eq!(mapper.read_str::<Projected>("").unwrap(), None);
        assert_eq!(mapper.read_str::<Projected>("  \n").unwrap(), None);
    }

    #[test]
    fn read_str_empty_object_is_instance() {
        let mapper = PathMapper::new();
        assert_eq!(
            mapper.read_str::<Projected>("{ }").unwrap(),
            Some(Projected::default())
        );
    }

    #[test]
    fn read_str_array_is_shape_error() {
        let err = PathMapper::new().read_str::<Projected>("[]").unwrap_err();
        assert!(err.to_string().contains("Unexpected token"));
    }

    #[test]
    fn unsupported_type_bypasses_pipeline() {
        let mapper = PathMapper::new();
        assert!(!mapper.supports::<Plain>());

        // The descriptor would read "value"; plain serde reads "other"
        let plain: Plain = mapper.read_value(&json!({ "value": 1, "other": 2 })).unwrap();
        assert_eq!(plain, Plain { value: 2 });
        assert_eq!(
            mapper.write_value(Some(&plain)).unwrap(),
            json!({ "other": 2 })
        );
    }

    #[test]
    fn naming_policy_applies_on_read_and_write() {
        let mapper = PathMapper::with_config(MapperConfig::new().with_naming(NamingPolicy::CamelCase));
        let stub: Projected = mapper
            .read_value(&json!({ "main": { "nested": { "value": 3 } }, "mainValue": 8 }))
            .unwrap();
        assert_eq!(
            stub,
            Projected {
                value: 3,
                main_value: 8
            }
        );
        assert_eq!(
            mapper.write_string(Some(&stub)).unwrap(),
            r#"{"value":3,"mainValue":8}"#
        );
    }

    #[test]
    fn populate_keeps_untouched_fields() {
        let mut stub = Projected {
            value: 1,
            main_value: 5,
        };
        PathMapper::new()
            .populate(&json!({ "main": { "nested": { "value": 3 } } }), &mut stub)
            .unwrap();
        assert_eq!(
            stub,
            Projected {
                value: 3,
                main_value: 5
            }
        );
    }

    #[test]
    fn write_null_instance() {
        let mapper = PathMapper::new();
        assert_eq!(mapper.write_string::<Projected>(None).unwrap(), "null");
        assert_eq!(mapper.write_value::<Projected>(None).unwrap(), Value::Null);
    }

    #[test]
    fn macro_routes_generic_serde() {
        let stub: Projected =
            serde_json::from_str(r#"{ "main": { "nested": { "value": 3 } } }"#).unwrap();
        assert_eq!(stub.value, 3);
        assert_eq!(
            serde_json::to_value(&stub).unwrap(),
            json!({ "value": 3, "main_value": 0 })
        );
    }

    #[test]
    fn current_outside_call_uses_defaults() {
        assert_eq!(PathMapper::current().config(), &MapperConfig::default());
    }
}
