//! Type descriptors
//!
//! A [`TypeDescriptor`] is the ordered list of [`FieldDescriptor`]s for one
//! mapped type plus a factory producing fresh instances. Types opt in by
//! implementing [`PathMapped`].

use crate::error::DescriptorError;
use crate::field::FieldDescriptor;
use crate::shape::TypeShape;
use std::collections::HashSet;
use std::fmt::{self, Debug, Formatter};

/// A type that can be mapped through query-projected field descriptors
///
/// # Example
///
/// ```rust
/// use pathmap_model::{DescriptorError, FieldDescriptor, PathMapped, TypeDescriptor};
///
/// #[derive(Default)]
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
/// assert!(Stub::describe().unwrap().has_projected_fields());
/// ```
pub trait PathMapped: Sized + 'static {
    /// Build the descriptor for this type
    ///
    /// Called at most once per type by the descriptor cache, except when two
    /// threads race on first use.
    fn describe() -> Result<TypeDescriptor<Self>, DescriptorError>;
}

/// Ordered field metadata and factory for one mapped type
pub struct TypeDescriptor<T> {
    type_name: &'static str,
    shape: TypeShape,
    fields: Vec<FieldDescriptor<T>>,
    factory: fn() -> T,
}

impl<T> TypeDescriptor<T> {
    /// Start building a descriptor
    #[must_use]
    pub fn builder(factory: fn() -> T) -> TypeDescriptorBuilder<T> {
        TypeDescriptorBuilder {
            type_name: std::any::type_name::<T>(),
            shape: TypeShape::Struct,
            fields: Vec::new(),
            factory,
        }
    }

    /// Rust type name
    #[inline]
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Declared shape of the described type
    #[inline]
    #[must_use]
    pub fn shape(&self) -> TypeShape {
        self.shape
    }

    /// Check if instances map to document objects
    #[inline]
    #[must_use]
    pub fn is_object_shaped(&self) -> bool {
        self.shape.is_object()
    }

    /// Fields in declaration order
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor<T>] {
        &self.fields
    }

    /// Look up a field by declared name
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor<T>> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Projected fields with their declaration index
    pub fn projected_fields(&self) -> impl Iterator<Item = (usize, &FieldDescriptor<T>)> + '_ {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, field)| field.is_projected())
    }

    /// Check if any field is projected
    #[must_use]
    pub fn has_projected_fields(&self) -> bool {
        self.fields.iter().any(FieldDescriptor::is_projected)
    }

    /// Create a fresh instance
    #[inline]
    #[must_use]
    pub fn create(&self) -> T {
        (self.factory)()
    }
}

impl<T> Debug for TypeDescriptor<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_name", &self.type_name)
            .field("shape", &self.shape)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

/// Builder for [`TypeDescriptor`]
pub struct TypeDescriptorBuilder<T> {
    type_name: &'static str,
    shape: TypeShape,
    fields: Vec<FieldDescriptor<T>>,
    factory: fn() -> T,
}

impl<T> TypeDescriptorBuilder<T> {
    /// Append a field
    #[must_use]
    pub fn field(mut self, field: FieldDescriptor<T>) -> Self {
        self.fields.push(field);
        self
    }

    /// Override the shape of the described type
    #[must_use]
    pub fn with_shape(mut self, shape: TypeShape) -> Self {
        self.shape = shape;
        self
    }

    /// Validate and build
    ///
    /// Only declared field names are compared. Member names come from the
    /// mapper's naming policy at call time, so two fields that map to the same
    /// member (`main_value` and `mainValue` under camelCase) are accepted here.
    ///
    /// # Errors
    /// Returns [`DescriptorError::DuplicateField`] if two fields share a declared name.
    pub fn build(self) -> Result<TypeDescriptor<T>, DescriptorError> {
        let mut seen = HashSet::with_capacity(self.fields.len());
        for field in &self.fields {
            if !seen.insert(field.name()) {
                return Err(DescriptorError::duplicate_field(self.type_name, field.name()));
            }
        }

        Ok(TypeDescriptor {
            type_name: self.type_name,
            shape: self.shape,
            fields: self.fields,
            factory: self.factory,
        })
    }
}
