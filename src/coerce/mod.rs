//! Value coercion
//!
//! Raw condition values are converted to the static type of the field they
//! are compared against before a strategy sees them.
//!
//! Wire values (`Scalar::Json`) are extracted without reinterpretation: a
//! JSON string never becomes a number. Native scalars go through looser
//! convertible rules such as numeric narrowing with range checks and
//! trimmed string parsing.

mod json;
mod scalar;

use crate::error::{QueryMatrixError, Result};
use crate::matrix::{ConditionValue, Scalar};
use crate::record::{FieldType, Value};

/// Coerce a condition value to `target`
pub fn coerce(raw: &ConditionValue, target: &FieldType) -> Result<Value> {
    match raw {
        ConditionValue::Null => Ok(Value::Null),
        ConditionValue::Single(scalar) => coerce_scalar(scalar, target),
        ConditionValue::Pattern(pattern) => scalar::convert(&Scalar::String(pattern.clone()), target),
        ConditionValue::Array(items) => match target {
            FieldType::Array(element) => items
                .iter()
                .map(|item| coerce_scalar(item, element))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            _ => Err(QueryMatrixError::unsupported_value("array", target)),
        },
        ConditionValue::Column(_) => Err(QueryMatrixError::unsupported_value("column", target)),
    }
}

/// Coerce one raw scalar to `target`
pub fn coerce_scalar(raw: &Scalar, target: &FieldType) -> Result<Value> {
    match raw {
        Scalar::Json(json) => json::coerce_json(json, target),
        _ => scalar::convert(raw, target),
    }
}
