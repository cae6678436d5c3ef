//! Query resolution against a document root
//!
//! Evaluates a [`QueryExpression`] and normalizes the match arity so a single
//! field declaration can serve both scalar and multi-value expressions.

use crate::expression::QueryExpression;
use serde_json::Value;
use std::borrow::Cow;

/// Normalized result of evaluating one query expression
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedToken<'a> {
    /// No node matched
    Absent,

    /// Exactly one node matched
    Single(&'a Value),

    /// Two or more nodes matched, in match order
    Many(Vec<&'a Value>),
}

impl<'a> ResolvedToken<'a> {
    /// Collapse-or-wrap a list of matches
    ///
    /// Zero matches → [`Absent`](Self::Absent), one match → [`Single`](Self::Single),
    /// otherwise [`Many`](Self::Many).
    #[must_use]
    pub fn from_matches(mut matches: Vec<&'a Value>) -> Self {
        match matches.len() {
            0 => Self::Absent,
            1 => Self::Single(matches.remove(0)),
            _ => Self::Many(matches),
        }
    }

    /// Check if nothing matched
    #[inline]
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Number of matched nodes
    #[inline]
    #[must_use]
    pub fn match_count(&self) -> usize {
        match self {
            Self::Absent => 0,
            Self::Single(_) => 1,
            Self::Many(nodes) => nodes.len(),
        }
    }

    /// Convert into a single tree node
    ///
    /// Multiple matches are wrapped into a synthetic array node.
    #[must_use]
    pub fn into_node(self) -> Option<Cow<'a, Value>> {
        match self {
            Self::Absent => None,
            Self::Single(node) => Some(Cow::Borrowed(node)),
            Self::Many(nodes) => Some(Cow::Owned(Value::Array(
                nodes.into_iter().cloned().collect(),
            ))),
        }
    }
}

/// Evaluate `expression` against `root`
#[must_use]
pub fn resolve<'a>(root: &'a Value, expression: &QueryExpression) -> ResolvedToken<'a> {
    let matches = expression.path().query(root).all();
    let token = ResolvedToken::from_matches(matches);

    tracing::trace!(
        "Resolved '{}' to {} match(es)",
        expression.source(),
        token.match_count()
    );

    token
}
