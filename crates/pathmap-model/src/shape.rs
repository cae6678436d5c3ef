//! Declared type shapes
//!
//! The mapper never reflects over Rust types. Instead, [`FieldType::of`] drives a
//! type's `Deserialize` impl against a recording deserializer and keeps the first
//! request it makes (`deserialize_seq`, `deserialize_struct`, ...). `Option<_>`
//! and newtype wrappers are looked through, so `Option<Vec<u8>>` is a nullable
//! growable sequence.

use serde::de::{DeserializeOwned, Visitor};
use serde::Deserializer;
use serde_json::Value;
use std::fmt::{self, Display, Formatter};

/// How a sequence type is constructed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceKind {
    /// Growable collections (`Vec`, `VecDeque`, sets, ...)
    Growable,

    /// Fixed-length arrays and tuples
    Fixed(usize),
}

/// Structural shape of a declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeShape {
    /// `()` and unit structs
    Unit,
    /// `bool`
    Bool,
    /// Signed and unsigned integers
    Integer,
    /// `f32` / `f64`
    Float,
    /// `char`
    Char,
    /// `String` / `&str`
    String,
    /// Byte buffers
    Bytes,
    /// Sequences
    Sequence(SequenceKind),
    /// Key/value maps
    Map,
    /// Named-field structs
    Struct,
    /// Enums
    Enum,
    /// Self-describing or otherwise dynamic types (e.g. `serde_json::Value`)
    Any,
}

impl TypeShape {
    /// Check if the shape is a sequence
    #[inline]
    #[must_use]
    pub fn is_collection(self) -> bool {
        matches!(self, Self::Sequence(_))
    }

    /// Check if values of this shape can be mapped as objects
    #[inline]
    #[must_use]
    pub fn is_object(self) -> bool {
        matches!(self, Self::Struct | Self::Map | Self::Any)
    }

    /// Probe the shape of `F`
    #[must_use]
    pub fn of<F: DeserializeOwned>() -> Self {
        Probe::run::<F>().shape
    }
}

impl Display for TypeShape {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit => f.write_str("unit"),
            Self::Bool => f.write_str("bool"),
            Self::Integer => f.write_str("integer"),
            Self::Float => f.write_str("float"),
            Self::Char => f.write_str("char"),
            Self::String => f.write_str("string"),
            Self::Bytes => f.write_str("bytes"),
            Self::Sequence(SequenceKind::Growable) => f.write_str("sequence"),
            Self::Sequence(SequenceKind::Fixed(len)) => write!(f, "array[{len}]"),
            Self::Map => f.write_str("map"),
            Self::Struct => f.write_str("struct"),
            Self::Enum => f.write_str("enum"),
            Self::Any => f.write_str("any"),
        }
    }
}

/// Declared type of a mapped field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldType {
    type_name: &'static str,
    shape: TypeShape,
    nullable: bool,
}

impl FieldType {
    /// Describe `F`
    #[must_use]
    pub fn of<F: DeserializeOwned>() -> Self {
        let probe = Probe::run::<F>();
        Self {
            type_name: std::any::type_name::<F>(),
            shape: probe.shape,
            nullable: probe.nullable,
        }
    }

    /// Create from explicit parts
    #[inline]
    #[must_use]
    pub const fn new(type_name: &'static str, shape: TypeShape, nullable: bool) -> Self {
        Self {
            type_name,
            shape,
            nullable,
        }
    }

    /// Rust type name
    #[inline]
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Shape (looking through `Option`)
    #[inline]
    #[must_use]
    pub fn shape(&self) -> TypeShape {
        self.shape
    }

    /// Whether the type accepts `null`
    #[inline]
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Check if the type is a sequence
    #[inline]
    #[must_use]
    pub fn is_collection(&self) -> bool {
        self.shape.is_collection()
    }

    /// Replace the shape
    #[inline]
    #[must_use]
    pub fn with_shape(mut self, shape: TypeShape) -> Self {
        self.shape = shape;
        self
    }
}

/// Short name of a document node's shape
#[must_use]
pub fn node_kind(node: &Value) -> &'static str {
    match node {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

struct Probe {
    shape: TypeShape,
    nullable: bool,
}

impl Probe {
    fn run<F: DeserializeOwned>() -> Self {
        let mut recorded = Recorded::default();
        // The probe always stops with an error once a shape is recorded.
        let _ = F::deserialize(ShapeProbe {
            recorded: &mut recorded,
        });
        Self {
            shape: recorded.shape.unwrap_or(TypeShape::Any),
            nullable: recorded.nullable,
        }
    }
}

#[derive(Default)]
struct Recorded {
    shape: Option<TypeShape>,
    nullable: bool,
}

#[derive(Debug)]
struct ProbeStop;

impl Display for ProbeStop {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("shape recorded")
    }
}

impl std::error::Error for ProbeStop {}

impl serde::de::Error for ProbeStop {
    fn custom<T: Display>(_msg: T) -> Self {
        ProbeStop
    }
}

struct ShapeProbe<'r> {
    recorded: &'r mut Recorded,
}

impl ShapeProbe<'_> {
    fn record<T>(self, shape: TypeShape) -> Result<T, ProbeStop> {
        if self.recorded.shape.is_none() {
            self.recorded.shape = Some(shape);
        }
        Err(ProbeStop)
    }
}

impl<'de> Deserializer<'de> for ShapeProbe<'_> {
    type Error = ProbeStop;

    fn deserialize_any<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, ProbeStop> {
        self.record(TypeShape::Any)
    }

    fn deserialize_bool<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, ProbeStop> {
        self.record(TypeShape::Bool)
    }

    fn deserialize_i8<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, ProbeStop> {
        self.record(TypeShape::Integer)
    }

    fn deserialize_i16<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, ProbeStop> {
        self.record(TypeShape::Integer)
    }

    fn deserialize_i32<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, ProbeStop> {
        self.record(TypeShape::Integer)
    }

    fn deserialize_i64<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, ProbeStop> {
        self.record(TypeShape::Integer)
    }

    fn deserialize_i128<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, ProbeStop> {
        self.record(TypeShape::Integer)
    }

    fn deserialize_u8<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, ProbeStop> {
        self.record(TypeShape::Integer)
    }

    fn deserialize_u16<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, ProbeStop> {
        self.record(TypeShape::Integer)
    }

    fn deserialize_u32<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, ProbeStop> {
        self.record(TypeShape::Integer)
    }

    fn deserialize_u64<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, ProbeStop> {
        self.record(TypeShape::Integer)
    }

    fn deserialize_u128<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, ProbeStop> {
        self.record(TypeShape::Integer)
    }

    fn deserialize_f32<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, ProbeStop> {
        self.record(TypeShape::Float)
    }

    fn deserialize_f64<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, ProbeStop> {
        self.record(TypeShape::Float)
    }

    fn deserialize_char<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, ProbeStop> {
        self.record(TypeShape::Char)
    }

    fn deserialize_str<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, ProbeStop> {
        self.record(TypeShape::String)
    }

    fn deserialize_string<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, ProbeStop> {
        self.record(TypeShape::String)
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, ProbeStop> {
        self.record(TypeShape::Bytes)
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, ProbeStop> {
        self.record(TypeShape::Bytes)
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, ProbeStop> {
        self.recorded.nullable = true;
        visitor.visit_some(self)
    }

    fn deserialize_unit<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, ProbeStop> {
        self.recorded.nullable = true;
        self.record(TypeShape::Unit)
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _visitor: V,
    ) -> Result<V::Value, ProbeStop> {
        self.record(TypeShape::Unit)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, ProbeStop> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, ProbeStop> {
        self.record(TypeShape::Sequence(SequenceKind::Growable))
    }

    fn deserialize_tuple<V: Visitor<'de>>(
        self,
        len: usize,
        _visitor: V,
    ) -> Result<V::Value, ProbeStop> {
        self.record(TypeShape::Sequence(SequenceKind::Fixed(len)))
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        len: usize,
        _visitor: V,
    ) -> Result<V::Value, ProbeStop> {
        self.record(TypeShape::Sequence(SequenceKind::Fixed(len)))
    }

    fn deserialize_map<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, ProbeStop> {
        self.record(TypeShape::Map)
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value, ProbeStop> {
        self.record(TypeShape::Struct)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value, ProbeStop> {
        self.record(TypeShape::Enum)
    }

    fn deserialize_identifier<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, ProbeStop> {
        self.record(TypeShape::String)
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, ProbeStop> {
        self.record(TypeShape::Any)
    }
}
