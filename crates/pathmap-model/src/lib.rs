//! pathmap Descriptor Model
//!
//! Per-type metadata driving query-projected mapping.
//!
//! # Core Concepts
//!
//! - [`FieldDescriptor`]: One member, optionally projected from a query expression
//! - [`TypeDescriptor`]: Ordered fields plus a factory
//! - [`PathMapped`]: Opt-in trait producing a type's descriptor
//! - [`DescriptorCache`]: Process-wide memo of descriptors and `supports` decisions
//! - [`ValueConverter`]: Custom node ↔ value conversion for a field or its items
//! - [`FieldType`]: Probed shape and nullability of a declared type
//! - [`field_descriptor!`]: Shorthand for a member's [`FieldDescriptor`]
//!
//! # Example
//!
//! ```rust
//! use pathmap_model::{DescriptorCache, DescriptorError, FieldDescriptor, PathMapped, TypeDescriptor};
//!
//! #[derive(Default)]
//! struct Stub {
//!     value: i32,
//!     normal_value: i32,
//! }
//!
//! impl PathMapped for Stub {
//!     fn describe() -> Result<TypeDescriptor<Self>, DescriptorError> {
//!         TypeDescriptor::builder(Stub::default)
//!             .field(
//!                 FieldDescriptor::new("value", |s: &Stub| &s.value, |s: &mut Stub| &mut s.value)
//!                     .with_query("main.nested.value")?,
//!             )
//!             .field(FieldDescriptor::new(
//!                 "normal_value",
//!                 |s: &Stub| &s.normal_value,
//!                 |s: &mut Stub| &mut s.normal_value,
//!             ))
//!             .build()
//!     }
//! }
//!
//! let cache = DescriptorCache::new();
//! assert!(cache.supports::<Stub>());
//! assert_eq!(cache.describe::<Stub>().unwrap().fields().len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod cache;
mod converter;
mod descriptor;
mod error;
mod field;
mod handling;
mod shape;

pub use cache::DescriptorCache;
pub use converter::{ConverterRef, FnConverter, ValueConverter};
pub use descriptor::{PathMapped, TypeDescriptor, TypeDescriptorBuilder};
pub use error::{ConvertError, DescriptorError};
pub use field::{FieldAccess, FieldDescriptor, ShouldSerialize};
pub use handling::{DefaultValueHandling, NullValueHandling};
pub use shape::{node_kind, FieldType, SequenceKind, TypeShape};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
