//! pathmap Core - query-projected object mapping
//!
//! Reads typed objects out of arbitrary positions in a JSON document and writes
//! them back:
//! - Projected fields are populated from a query expression evaluated against
//!   the document root
//! - Plain fields keep ordinary member-name mapping
//! - Every assignment goes through one default/null value policy
//!
//! # Core Concepts
//!
//! - [`PathMapper`]: Entry point; gated read/write, populate, descriptor access
//! - [`MapperConfig`]: Default/null handling and member naming
//! - [`policy`]: Value assignment policy
//! - [`materialize`](materialize::materialize): Collection building for item converters
//! - [`impl_path_mapped_serde!`]: Route a type's serde impls through the mapper
//!
//! # Example
//!
//! ```rust
//! use pathmap_core::PathMapper;
//! use pathmap_model::{DescriptorError, FieldDescriptor, PathMapped, TypeDescriptor};
//! use serde_json::json;
//!
//! #[derive(Debug, Default)]
//! struct Scores {
//!     high: Vec<i32>,
//! }
//!
//! impl PathMapped for Scores {
//!     fn describe() -> Result<TypeDescriptor<Self>, DescriptorError> {
//!         TypeDescriptor::builder(Scores::default)
//!             .field(
//!                 FieldDescriptor::new("high", |s: &Scores| &s.high, |s: &mut Scores| &mut s.high)
//!                     .with_query("values[?@ > 10]")?,
//!             )
//!             .build()
//!     }
//! }
//!
//! let mapper = PathMapper::new();
//! let scores: Scores = mapper.read(&json!({ "values": [5, 11, 16] })).unwrap();
//! assert_eq!(scores.high, vec![11, 16]);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
mod context;
pub mod error;
pub mod mapper;
pub mod materialize;
pub mod policy;
pub mod read;
pub mod write;

pub use config::{MapperConfig, NamingPolicy};
pub use error::{MapperError, MapperResult};
pub use mapper::PathMapper;
pub use write::MappedSerialize;

#[doc(hidden)]
pub mod __private {
    pub use serde;
    pub use serde_json::Value;
}

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for declaring and mapping types
    pub use crate::{impl_path_mapped_serde, MapperConfig, MapperError, NamingPolicy, PathMapper};
    pub use pathmap_model::{
        DefaultValueHandling, DescriptorError, FieldDescriptor, FnConverter, NullValueHandling,
        PathMapped, TypeDescriptor, ValueConverter,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
