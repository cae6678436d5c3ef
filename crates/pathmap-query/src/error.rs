//! Error types for query resolution

/// Errors raised while preparing query expressions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Expression is not valid JSONPath
    #[error("invalid query expression '{expression}': {message}")]
    InvalidExpression {
        /// Expression as declared
        expression: String,
        /// Parser message
        message: String,
    },
}

impl QueryError {
    /// Create invalid expression error
    pub fn invalid_expression(expression: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidExpression {
            expression: expression.into(),
            message: message.into(),
        }
    }

    /// Expression that caused the error
    #[must_use]
    pub fn expression(&self) -> &str {
        match self {
            Self::InvalidExpression { expression, .. } => expression,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_expression_display() {
        let err = QueryError::invalid_expression("a[", "unexpected end of input");
        assert_eq!(
            err.to_string(),
            "invalid query expression 'a[': unexpected end of input"
        );
        assert_eq!(err.expression(), "a[");
    }
}
