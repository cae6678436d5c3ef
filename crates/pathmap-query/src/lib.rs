//! pathmap Query Resolution
//!
//! Thin boundary over the JSONPath evaluator used by projected fields.
//!
//! # Core Concepts
//!
//! - [`QueryExpression`]: Parsed expression, accepting the relaxed dotted form
//! - [`resolve`]: Evaluate an expression against a document root
//! - [`ResolvedToken`]: Zero / one / many matches, collapsed or wrapped
//!
//! # Example
//!
//! ```rust
//! use pathmap_query::{resolve, QueryExpression};
//! use serde_json::json;
//!
//! let doc = json!({ "main": { "nested": { "value": 3 } } });
//! let expr = QueryExpression::parse("main.nested.value").unwrap();
//!
//! let node = resolve(&doc, &expr).into_node().unwrap();
//! assert_eq!(node.as_ref(), &json!(3));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod error;
mod expression;
mod resolve;

pub use error::QueryError;
pub use expression::QueryExpression;
pub use resolve::{resolve, ResolvedToken};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
