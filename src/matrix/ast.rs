//! Condition and matrix values

use crate::error::{QueryMatrixError, Result};
use crate::operator::{LogicalOperator, Operator};
use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use std::fmt;
use uuid::Uuid;

/// A raw constant before coercion to a field type
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Decimal(Decimal),
    String(String),
    DateTime(DateTime<Utc>),
    Uuid(Uuid),
    /// Value decoded from the wire, converted lazily per target type
    Json(serde_json::Value),
}

impl Scalar {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Scalar::Bool(_) => "bool",
            Scalar::Int(_) => "int",
            Scalar::Float(_) => "float",
            Scalar::Decimal(_) => "decimal",
            Scalar::String(_) => "string",
            Scalar::DateTime(_) => "datetime",
            Scalar::Uuid(_) => "uuid",
            Scalar::Json(serde_json::Value::Null) => "null",
            Scalar::Json(serde_json::Value::Bool(_)) => "json bool",
            Scalar::Json(serde_json::Value::Number(_)) => "json number",
            Scalar::Json(serde_json::Value::String(_)) => "json string",
            Scalar::Json(serde_json::Value::Array(_)) => "json array",
            Scalar::Json(serde_json::Value::Object(_)) => "json object",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(v) => write!(f, "{}", v),
            Scalar::Int(v) => write!(f, "{}", v),
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::Decimal(v) => write!(f, "{}", v),
            Scalar::String(v) => write!(f, "{:?}", v),
            Scalar::DateTime(v) => f.write_str(&v.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Scalar::Uuid(v) => write!(f, "{}", v),
            Scalar::Json(v) => write!(f, "{}", v),
        }
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Int(i64::from(v))
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::String(v.to_string())
    }
}

macro_rules! impl_from_for_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(v: $ty) -> Self {
                    Scalar::$variant(v)
                }
            }
        )*
    };
}

impl_from_for_scalar! {
    bool => Bool,
    i64 => Int,
    f64 => Float,
    Decimal => Decimal,
    String => String,
    DateTime<Utc> => DateTime,
    Uuid => Uuid,
    serde_json::Value => Json,
}

/// Right-hand side of a condition
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionValue {
    Single(Scalar),
    /// Only valid with `_in` and `_nin`
    Array(Vec<Scalar>),
    /// Name of the compared field; only valid with column operators
    Column(String),
    Pattern(String),
    Null,
}

impl ConditionValue {
    pub fn single(value: impl Into<Scalar>) -> Self {
        ConditionValue::Single(value.into())
    }

    pub fn array<T: Into<Scalar>>(values: impl IntoIterator<Item = T>) -> Self {
        ConditionValue::Array(values.into_iter().map(Into::into).collect())
    }

    pub fn pattern(pattern: impl Into<String>) -> Self {
        ConditionValue::Pattern(pattern.into())
    }

    /// True for arrays, including wire arrays not yet coerced
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            ConditionValue::Array(_) | ConditionValue::Single(Scalar::Json(serde_json::Value::Array(_)))
        )
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            ConditionValue::Single(scalar) => scalar.kind_name(),
            ConditionValue::Array(_) => "array",
            ConditionValue::Column(_) => "column",
            ConditionValue::Pattern(_) => "pattern",
            ConditionValue::Null => "null",
        }
    }
}

/// One leaf test: field, operator, value
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    field: String,
    operator: Operator,
    value: ConditionValue,
}

impl Condition {
    /// Build a condition, validating the field, operator and value shape
    pub fn new(field: impl Into<String>, operator: Operator, value: ConditionValue) -> Result<Self> {
        let field = field.into();
        if field.trim().is_empty() {
            return Err(QueryMatrixError::InvalidCondition(
                "Field name cannot be empty".to_string(),
            ));
        }
        if operator.is_logical() {
            return Err(QueryMatrixError::InvalidCondition(format!(
                "Logical operator '{}' cannot be used in a condition on '{}'",
                operator.code(),
                field
            )));
        }

        match &value {
            ConditionValue::Column(other) if !operator.is_column_operation() => {
                return Err(QueryMatrixError::InvalidCondition(format!(
                    "Column reference '{}' requires a column operator, got '{}'",
                    other,
                    operator.code()
                )))
            }
            ConditionValue::Column(other) if other.trim().is_empty() => {
                return Err(QueryMatrixError::InvalidCondition(
                    "Compared column name cannot be empty".to_string(),
                ))
            }
            ConditionValue::Column(_) => {}
            _ if operator.is_column_operation() => {
                return Err(QueryMatrixError::InvalidCondition(format!(
                    "Operator '{}' on '{}' requires a column to compare to",
                    operator.code(),
                    field
                )))
            }
            _ => {}
        }

        Ok(Self {
            field,
            operator,
            value,
        })
    }

    /// Field-vs-field condition
    pub fn column(
        field: impl Into<String>,
        operator: Operator,
        other: impl Into<String>,
    ) -> Result<Self> {
        if !operator.is_column_operation() {
            return Err(QueryMatrixError::InvalidCondition(format!(
                "Operator '{}' is not a column comparison operator",
                operator.code()
            )));
        }
        Self::new(field, operator, ConditionValue::Column(other.into()))
    }

    pub fn is_null(field: impl Into<String>) -> Result<Self> {
        Self::new(field, Operator::IsNull, ConditionValue::Null)
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn value(&self) -> &ConditionValue {
        &self.value
    }

    /// The compared field of a column condition
    pub fn compare_to_column(&self) -> Option<&str> {
        match &self.value {
            ConditionValue::Column(other) => Some(other),
            _ => None,
        }
    }
}

/// A node of the filter tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryMatrix {
    logical_operator: LogicalOperator,
    conditions: Vec<Condition>,
    nested: Vec<QueryMatrix>,
}

impl QueryMatrix {
    pub fn new(
        logical_operator: LogicalOperator,
        conditions: Vec<Condition>,
        nested: Vec<QueryMatrix>,
    ) -> Self {
        Self {
            logical_operator,
            conditions,
            nested,
        }
    }

    pub fn logical_operator(&self) -> LogicalOperator {
        self.logical_operator
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn nested_matrices(&self) -> &[QueryMatrix] {
        &self.nested
    }

    /// No conditions and no nested matrices
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.nested.is_empty()
    }

    /// Levels in the tree, counting this node
    pub fn depth(&self) -> usize {
        1 + self.nested.iter().map(QueryMatrix::depth).max().unwrap_or(0)
    }
}
