//! Query expressions
//!
//! Provides [`QueryExpression`], a parsed JSONPath expression that remembers the
//! text it was declared with.

use crate::error::QueryError;
use serde_json_path::JsonPath;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// A parsed query expression
///
/// Accepts both RFC 9535 paths (`$.store.book[0]`) and the relaxed dotted form
/// commonly used in field annotations, where the root marker is implied:
///
/// - `main.nested.value` → `$.main.nested.value`
/// - `..name` → `$..name`
/// - `[0].value` → `$[0].value`
/// - `` (empty) → `$`
#[derive(Debug, Clone)]
pub struct QueryExpression {
    source: String,
    normalized: String,
    path: JsonPath,
}

impl QueryExpression {
    /// Parse an expression
    ///
    /// # Errors
    /// Returns [`QueryError::InvalidExpression`] naming the offending expression
    /// when it is not valid JSONPath after normalization.
    pub fn parse(expression: &str) -> Result<Self, QueryError> {
        let normalized = normalize(expression);
        let path = JsonPath::parse(&normalized)
            .map_err(|e| QueryError::invalid_expression(expression, e.to_string()))?;

        Ok(Self {
            source: expression.to_string(),
            normalized,
            path,
        })
    }

    /// Expression text as declared
    #[inline]
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Expression text in RFC 9535 form
    #[inline]
    #[must_use]
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Whether the expression selects the document root itself
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.normalized == "$"
    }

    #[inline]
    pub(crate) fn path(&self) -> &JsonPath {
        &self.path
    }
}

impl PartialEq for QueryExpression {
    fn eq(&self, other: &Self) -> bool {
        self.normalized == other.normalized
    }
}

impl Eq for QueryExpression {}

impl Display for QueryExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for QueryExpression {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn normalize(expression: &str) -> String {
    let trimmed = expression.trim();
    if trimmed.is_empty() {
        return "$".to_string();
    }
    if trimmed.starts_with('$') {
        return trimmed.to_string();
    }
    if trimmed.starts_with('.') || trimmed.starts_with('[') {
        return format!("${trimmed}");
    }
    format!("$.{trimmed}")
}
