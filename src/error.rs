//! Error types for pushdown.

use thiserror::Error;

/// The main error type for pushdown operations.
#[derive(Debug, Error)]
pub enum PushdownError {
    /// A dialect property could not be parsed. Carries the raw value.
    #[error("Invalid value '{value}' for property {property}: {reason}")]
    InvalidProperty {
        property: &'static str,
        value: String,
        reason: String,
    },

    /// The dialect cannot be built from the supplied configuration.
    #[error("Malformed {dialect} dialect: {message}")]
    MalformedDialect {
        dialect: &'static str,
        message: String,
    },

    /// The AST violates a structural invariant of SQL generation.
    #[error("Invalid AST at {node}: {message}")]
    InvalidAst { node: &'static str, message: String },

    /// Unknown dialect name.
    #[error("Unknown dialect: '{0}'")]
    UnknownDialect(String),

    #[error("Configuration error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl PushdownError {
    /// Create an invalid property error echoing the raw value.
    pub fn property(
        property: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidProperty {
            property,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a malformed dialect error.
    pub fn malformed(dialect: &'static str, message: impl Into<String>) -> Self {
        Self::MalformedDialect {
            dialect,
            message: message.into(),
        }
    }

    /// Create an invalid AST error.
    pub fn invalid_ast(node: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidAst {
            node,
            message: message.into(),
        }
    }
}

/// Result type alias for pushdown operations.
pub type PushdownResult<T> = Result<T, PushdownError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PushdownError::property("cast_number_to_decimal", "10;2", "expected 'precision,scale'");
        assert_eq!(
            err.to_string(),
            "Invalid value '10;2' for property cast_number_to_decimal: expected 'precision,scale'"
        );

        let err = PushdownError::invalid_ast("aggregate SUM", "expected 1 argument, got 0");
        assert_eq!(
            err.to_string(),
            "Invalid AST at aggregate SUM: expected 1 argument, got 0"
        );
    }
}
