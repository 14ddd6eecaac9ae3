//! Error types for the query matrix compiler

use thiserror::Error;

/// Main error type for the query matrix compiler
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryMatrixError {
    #[error("Unknown field '{field}' on record '{record}'")]
    UnknownField { field: String, record: &'static str },

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("No {context} strategy registered for operator '{operator}'")]
    UnsupportedOperator {
        operator: &'static str,
        context: &'static str,
    },

    #[error("Invalid condition: {0}")]
    InvalidCondition(String),

    #[error("Cannot convert {value} to {target}")]
    ValueConversion { value: String, target: String },

    #[error("Unsupported value of type {value_type} for target {target}")]
    UnsupportedValue { value_type: String, target: String },

    #[error("Maximum matrix depth of {max_depth} exceeded")]
    DepthExceeded { max_depth: usize },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl QueryMatrixError {
    pub(crate) fn conversion(value: impl std::fmt::Display, target: impl std::fmt::Display) -> Self {
        QueryMatrixError::ValueConversion {
            value: value.to_string(),
            target: target.to_string(),
        }
    }

    pub(crate) fn unsupported_value(
        value_type: impl std::fmt::Display,
        target: impl std::fmt::Display,
    ) -> Self {
        QueryMatrixError::UnsupportedValue {
            value_type: value_type.to_string(),
            target: target.to_string(),
        }
    }
}

impl From<serde_json::Error> for QueryMatrixError {
    fn from(err: serde_json::Error) -> Self {
        QueryMatrixError::Serialization(err.to_string())
    }
}

/// Result type alias for the query matrix compiler
pub type Result<T> = std::result::Result<T, QueryMatrixError>;
