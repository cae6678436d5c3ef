//! Field descriptors
//!
//! A [`FieldDescriptor`] carries everything the pipelines need to know about one
//! member of a mapped type: its name, declared type, optional query expression,
//! converters, default/null handling overrides, access flags, and a typed
//! accessor to the member itself.

use crate::converter::{ConverterRef, ValueConverter};
use crate::error::ConvertError;
use crate::handling::{DefaultValueHandling, NullValueHandling};
use crate::shape::{FieldType, TypeShape};
use pathmap_query::{QueryError, QueryExpression};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

/// Type-erased access to one member of `T`
///
/// Values cross this boundary as [`Value`]; decoding into the declared type
/// happens in [`set`](Self::set).
pub trait FieldAccess<T>: Send + Sync {
    /// Encode the current member value
    fn get(&self, target: &T) -> Result<Value, ConvertError>;

    /// Decode `value` into the member type and assign it
    fn set(&self, target: &mut T, value: Value) -> Result<(), ConvertError>;

    /// Assign the member type's zero value
    fn reset(&self, target: &mut T);

    /// Encoded zero value of the member type
    fn zero(&self) -> Result<Value, ConvertError>;
}

struct Accessor<T, F> {
    get: fn(&T) -> &F,
    get_mut: fn(&mut T) -> &mut F,
}

impl<T, F> FieldAccess<T> for Accessor<T, F>
where
    F: Serialize + DeserializeOwned + Default,
{
    fn get(&self, target: &T) -> Result<Value, ConvertError> {
        Ok(serde_json::to_value((self.get)(target))?)
    }

    fn set(&self, target: &mut T, value: Value) -> Result<(), ConvertError> {
        // Decode before touching the member so a failed decode leaves it intact
        let decoded: F = serde_json::from_value(value)?;
        *(self.get_mut)(target) = decoded;
        Ok(())
    }

    fn reset(&self, target: &mut T) {
        *(self.get_mut)(target) = F::default();
    }

    fn zero(&self) -> Result<Value, ConvertError> {
        Ok(serde_json::to_value(F::default())?)
    }
}

/// Predicate deciding whether a field is emitted for a given instance
pub type ShouldSerialize<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Metadata for one member of a mapped type
pub struct FieldDescriptor<T> {
    name: String,
    field_type: FieldType,
    query: Option<QueryExpression>,
    converter: Option<ConverterRef>,
    item_converter: Option<ConverterRef>,
    default_value: Option<Value>,
    default_value_handling: Option<DefaultValueHandling>,
    null_value_handling: Option<NullValueHandling>,
    readable: bool,
    writable: bool,
    ignored: bool,
    should_serialize: Option<ShouldSerialize<T>>,
    access: Arc<dyn FieldAccess<T>>,
}

impl<T: 'static> FieldDescriptor<T> {
    /// Create a plain field
    ///
    /// `get`/`get_mut` project the member out of its owner; the member type is
    /// probed with [`FieldType::of`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use pathmap_model::FieldDescriptor;
    ///
    /// struct Stub {
    ///     value: i32,
    /// }
    ///
    /// let field = FieldDescriptor::new("value", |s: &Stub| &s.value, |s: &mut Stub| &mut s.value)
    ///     .with_query("main.nested.value")
    ///     .unwrap();
    /// assert!(field.is_projected());
    /// ```
    pub fn new<F>(name: impl Into<String>, get: fn(&T) -> &F, get_mut: fn(&mut T) -> &mut F) -> Self
    where
        F: Serialize + DeserializeOwned + Default + 'static,
    {
        Self {
            name: name.into(),
            field_type: FieldType::of::<F>(),
            query: None,
            converter: None,
            item_converter: None,
            default_value: None,
            default_value_handling: None,
            null_value_handling: None,
            readable: true,
            writable: true,
            ignored: false,
            should_serialize: None,
            access: Arc::new(Accessor { get, get_mut }),
        }
    }
}

impl<T> FieldDescriptor<T> {
    /// Project this field from a query expression
    ///
    /// # Errors
    /// Returns [`QueryError`] when the expression does not parse.
    pub fn with_query(self, expression: &str) -> Result<Self, QueryError> {
        Ok(self.with_query_expression(QueryExpression::parse(expression)?))
    }

    /// Project this field from an already parsed expression
    #[must_use]
    pub fn with_query_expression(mut self, expression: QueryExpression) -> Self {
        self.query = Some(expression);
        self
    }

    /// Attach a converter for the whole field
    #[must_use]
    pub fn with_converter<C: ValueConverter + 'static>(mut self, converter: C) -> Self {
        self.converter = Some(Arc::new(converter));
        self
    }

    /// Attach a converter applied to each item of a collection field
    #[must_use]
    pub fn with_item_converter<C: ValueConverter + 'static>(mut self, converter: C) -> Self {
        self.item_converter = Some(Arc::new(converter));
        self
    }

    /// Declare the field default
    #[must_use]
    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Override the default value handling for this field
    #[must_use]
    pub fn with_default_value_handling(mut self, handling: DefaultValueHandling) -> Self {
        self.default_value_handling = Some(handling);
        self
    }

    /// Override the null value handling for this field
    #[must_use]
    pub fn with_null_value_handling(mut self, handling: NullValueHandling) -> Self {
        self.null_value_handling = Some(handling);
        self
    }

    /// Set whether the field can be read (emitted, existing value hint)
    #[must_use]
    pub fn with_readable(mut self, readable: bool) -> Self {
        self.readable = readable;
        self
    }

    /// Set whether the field can be assigned
    #[must_use]
    pub fn with_writable(mut self, writable: bool) -> Self {
        self.writable = writable;
        self
    }

    /// Exclude the field from ordinary mapping
    #[must_use]
    pub fn with_ignored(mut self, ignored: bool) -> Self {
        self.ignored = ignored;
        self
    }

    /// Emit the field only when `predicate` holds
    #[must_use]
    pub fn with_should_serialize<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.should_serialize = Some(Arc::new(predicate));
        self
    }

    /// Override the probed shape of the declared type
    #[must_use]
    pub fn with_shape(mut self, shape: TypeShape) -> Self {
        self.field_type = self.field_type.with_shape(shape);
        self
    }

    /// Member name as declared
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type
    #[inline]
    #[must_use]
    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    /// Query expression, if projected
    #[inline]
    #[must_use]
    pub fn query(&self) -> Option<&QueryExpression> {
        self.query.as_ref()
    }

    /// Check if the field is populated from a query expression
    #[inline]
    #[must_use]
    pub fn is_projected(&self) -> bool {
        self.query.is_some()
    }

    /// Field converter
    #[inline]
    #[must_use]
    pub fn converter(&self) -> Option<&ConverterRef> {
        self.converter.as_ref()
    }

    /// Item converter
    #[inline]
    #[must_use]
    pub fn item_converter(&self) -> Option<&ConverterRef> {
        self.item_converter.as_ref()
    }

    /// Declared default
    #[inline]
    #[must_use]
    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    /// Per-field default value handling override
    #[inline]
    #[must_use]
    pub fn default_value_handling(&self) -> Option<DefaultValueHandling> {
        self.default_value_handling
    }

    /// Per-field null value handling override
    #[inline]
    #[must_use]
    pub fn null_value_handling(&self) -> Option<NullValueHandling> {
        self.null_value_handling
    }

    /// Check if the field can be read
    #[inline]
    #[must_use]
    pub fn is_readable(&self) -> bool {
        self.readable
    }

    /// Check if the field can be assigned
    #[inline]
    #[must_use]
    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// Check if the field is excluded from ordinary mapping
    #[inline]
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        self.ignored
    }

    /// Evaluate the conditional serialization predicate
    #[must_use]
    pub fn should_serialize(&self, target: &T) -> bool {
        self.should_serialize
            .as_ref()
            .map_or(true, |predicate| predicate(target))
    }

    /// Encode the current value
    ///
    /// # Errors
    /// Returns [`ConvertError`] if the member cannot be encoded.
    pub fn get(&self, target: &T) -> Result<Value, ConvertError> {
        self.access.get(target)
    }

    /// Current value passed to converters, when the field is readable
    ///
    /// # Errors
    /// Returns [`ConvertError`] if the member cannot be encoded.
    pub fn existing(&self, target: &T) -> Result<Option<Value>, ConvertError> {
        if !self.readable {
            return Ok(None);
        }
        self.access.get(target).map(Some)
    }

    /// Decode and assign a value
    ///
    /// # Errors
    /// Returns [`ConvertError`] if the value does not decode into the declared type.
    pub fn set(&self, target: &mut T, value: Value) -> Result<(), ConvertError> {
        self.access.set(target, value)
    }

    /// Assign the declared type's zero value
    pub fn reset(&self, target: &mut T) {
        self.access.reset(target);
    }

    /// Encoded zero value of the declared type
    ///
    /// # Errors
    /// Returns [`ConvertError`] if the zero value cannot be encoded.
    pub fn zero(&self) -> Result<Value, ConvertError> {
        self.access.zero()
    }

    /// Declared default, or the zero value when none is declared
    ///
    /// # Errors
    /// Returns [`ConvertError`] if the zero value cannot be encoded.
    pub fn effective_default(&self) -> Result<Value, ConvertError> {
        match &self.default_value {
            Some(value) => Ok(value.clone()),
            None => self.zero(),
        }
    }
}

impl<T> Clone for FieldDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            field_type: self.field_type,
            query: self.query.clone(),
            converter: self.converter.clone(),
            item_converter: self.item_converter.clone(),
            default_value: self.default_value.clone(),
            default_value_handling: self.default_value_handling,
            null_value_handling: self.null_value_handling,
            readable: self.readable,
            writable: self.writable,
            ignored: self.ignored,
            should_serialize: self.should_serialize.clone(),
            access: Arc::clone(&self.access),
        }
    }
}

impl<T> Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .field("query", &self.query.as_ref().map(QueryExpression::source))
            .field("converter", &self.converter)
            .field("item_converter", &self.item_converter)
            .field("default_value", &self.default_value)
            .field("default_value_handling", &self.default_value_handling)
            .field("null_value_handling", &self.null_value_handling)
            .field("readable", &self.readable)
            .field("writable", &self.writable)
            .field("ignored", &self.ignored)
            .field("should_serialize", &self.should_serialize.is_some())
            .finish_non_exhaustive()
    }
}

/// Build a [`FieldDescriptor`] for a named struct member
///
/// `field_descriptor!(Stub, main_value)` is shorthand for
/// `FieldDescriptor::new("main_value", |s: &Stub| &s.main_value, |s: &mut Stub| &mut s.main_value)`.
#[macro_export]
macro_rules! field_descriptor {
    ($owner:ty, $member:ident) => {
        $crate::FieldDescriptor::new(
            stringify!($member),
            |owner: &$owner| &owner.$member,
            |owner: &mut $owner| &mut owner.$member,
        )
    };
}
