//! Operator strategies
//!
//! A strategy turns one operator plus already coerced operands into a
//! record-independent fragment ([`ValueTest`] or [`ColumnTest`]). The
//! compiler pairs the fragment with the resolved field accessors.

use crate::error::{QueryMatrixError, Result};
use crate::operator::catalog::Operator;
use crate::operator::fragment::{ColumnTest, Comparison, ValueTest};
use crate::record::{FieldDescriptor, FieldType, Value};

/// Builds field-vs-constant tests
pub trait ValueStrategy: Send + Sync {
    /// Short name used in diagnostics
    fn name(&self) -> &'static str;

    fn can_handle(&self, op: Operator) -> bool;

    /// Whether the constant must be an array
    fn expects_collection(&self) -> bool {
        false
    }

    /// Type the raw constant is coerced to before building
    fn operand_type(&self, field: &FieldDescriptor) -> FieldType {
        if self.expects_collection() {
            field.field_type.clone().array_of()
        } else {
            field.field_type.clone()
        }
    }

    fn build_value_predicate(
        &self,
        op: Operator,
        field: &FieldDescriptor,
        constant: Value,
    ) -> Result<ValueTest>;
}

/// Builds field-vs-field tests
pub trait ColumnStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn can_handle(&self, op: Operator) -> bool;

    fn build_column_predicate(
        &self,
        op: Operator,
        left: &FieldDescriptor,
        right: &FieldDescriptor,
    ) -> Result<ColumnTest>;
}

fn unhandled(op: Operator, context: &'static str) -> QueryMatrixError {
    QueryMatrixError::UnsupportedOperator {
        operator: op.code(),
        context,
    }
}

fn require_ordered(op: Operator, field: &FieldDescriptor) -> Result<()> {
    if field.field_type.is_ordered() {
        Ok(())
    } else {
        Err(QueryMatrixError::InvalidCondition(format!(
            "Operator '{}' requires an ordered field, but '{}' is {}",
            op.code(),
            field.name,
            field.field_type
        )))
    }
}

fn require_string(op: Operator, field: &FieldDescriptor) -> Result<()> {
    if field.field_type == FieldType::String {
        Ok(())
    } else {
        Err(QueryMatrixError::InvalidCondition(format!(
            "Operator '{}' requires a string field, but '{}' is {}",
            op.code(),
            field.name,
            field.field_type
        )))
    }
}

/// One comparison, reachable through its value and column operator
#[derive(Debug, Clone, Copy)]
pub struct ComparisonStrategy {
    comparison: Comparison,
    value_op: Operator,
    column_op: Operator,
}

impl ComparisonStrategy {
    pub const fn new(comparison: Comparison, value_op: Operator, column_op: Operator) -> Self {
        Self {
            comparison,
            value_op,
            column_op,
        }
    }

    pub const fn equal() -> Self {
        Self::new(Comparison::Equal, Operator::Equal, Operator::ColumnEqual)
    }

    pub const fn not_equal() -> Self {
        Self::new(
            Comparison::NotEqual,
            Operator::NotEqual,
            Operator::ColumnNotEqual,
        )
    }

    pub const fn greater_than() -> Self {
        Self::new(
            Comparison::GreaterThan,
            Operator::GreaterThan,
            Operator::ColumnGreaterThan,
        )
    }

    pub const fn less_than() -> Self {
        Self::new(
            Comparison::LessThan,
            Operator::LessThan,
            Operator::ColumnLessThan,
        )
    }

    pub const fn greater_than_or_equal() -> Self {
        Self::new(
            Comparison::GreaterThanOrEqual,
            Operator::GreaterThanOrEqual,
            Operator::ColumnGreaterThanOrEqual,
        )
    }

    pub const fn less_than_or_equal() -> Self {
        Self::new(
            Comparison::LessThanOrEqual,
            Operator::LessThanOrEqual,
            Operator::ColumnLessThanOrEqual,
        )
    }

    pub fn comparison(&self) -> Comparison {
        self.comparison
    }
}

impl ValueStrategy for ComparisonStrategy {
    fn name(&self) -> &'static str {
        self.value_op.description()
    }

    fn can_handle(&self, op: Operator) -> bool {
        op == self.value_op
    }

    fn build_value_predicate(
        &self,
        op: Operator,
        field: &FieldDescriptor,
        constant: Value,
    ) -> Result<ValueTest> {
        if op != self.value_op {
            return Err(unhandled(op, "value"));
        }
        if self.comparison.is_ordering() {
            require_ordered(op, field)?;
        }
        Ok(ValueTest::Compare(self.comparison, constant))
    }
}

impl ColumnStrategy for ComparisonStrategy {
    fn name(&self) -> &'static str {
        self.column_op.description()
    }

    fn can_handle(&self, op: Operator) -> bool {
        op == self.column_op
    }

    fn build_column_predicate(
        &self,
        op: Operator,
        left: &FieldDescriptor,
        right: &FieldDescriptor,
    ) -> Result<ColumnTest> {
        if op != self.column_op {
            return Err(unhandled(op, "column"));
        }
        if left.field_type != right.field_type {
            return Err(QueryMatrixError::InvalidCondition(format!(
                "Cannot compare '{}' ({}) with '{}' ({})",
                left.name, left.field_type, right.name, right.field_type
            )));
        }
        if self.comparison.is_ordering() {
            require_ordered(op, left)?;
        }
        Ok(ColumnTest::Compare(self.comparison))
    }
}

fn membership(op: Operator, constant: Value) -> Result<ValueTest> {
    match constant {
        Value::Array(items) => Ok(ValueTest::In(items)),
        other => Err(QueryMatrixError::InvalidCondition(format!(
            "Operator '{}' requires an array value, got {}",
            op.code(),
            other.kind_name()
        ))),
    }
}

/// `_in`: field equals any element of the array
#[derive(Debug, Clone, Copy, Default)]
pub struct InStrategy;

impl ValueStrategy for InStrategy {
    fn name(&self) -> &'static str {
        "in"
    }

    fn can_handle(&self, op: Operator) -> bool {
        op == Operator::In
    }

    fn expects_collection(&self) -> bool {
        true
    }

    fn build_value_predicate(
        &self,
        op: Operator,
        _field: &FieldDescriptor,
        constant: Value,
    ) -> Result<ValueTest> {
        membership(op, constant)
    }
}

/// `_nin`: exact negation of `_in`
#[derive(Debug, Clone, Copy, Default)]
pub struct NotInStrategy;

impl ValueStrategy for NotInStrategy {
    fn name(&self) -> &'static str {
        "not in"
    }

    fn can_handle(&self, op: Operator) -> bool {
        op == Operator::NotIn
    }

    fn expects_collection(&self) -> bool {
        true
    }

    fn build_value_predicate(
        &self,
        op: Operator,
        _field: &FieldDescriptor,
        constant: Value,
    ) -> Result<ValueTest> {
        membership(op, constant).map(|test| ValueTest::Not(Box::new(test)))
    }
}

/// Substring matching for `_like`, `_ilike`, `_nlike`, `_clike` and `_cilike`
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternStrategy;

impl ValueStrategy for PatternStrategy {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn can_handle(&self, op: Operator) -> bool {
        matches!(op, Operator::Like | Operator::ILike | Operator::NotLike)
    }

    fn build_value_predicate(
        &self,
        op: Operator,
        field: &FieldDescriptor,
        constant: Value,
    ) -> Result<ValueTest> {
        require_string(op, field)?;
        let pattern = match constant {
            Value::String(pattern) => pattern,
            Value::Null => {
                return Err(QueryMatrixError::InvalidCondition(format!(
                    "Operator '{}' on '{}' requires a non-null pattern",
                    op.code(),
                    field.name
                )))
            }
            other => {
                return Err(QueryMatrixError::InvalidCondition(format!(
                    "Operator '{}' requires a string pattern, got {}",
                    op.code(),
                    other.kind_name()
                )))
            }
        };

        match op {
            Operator::Like => Ok(ValueTest::Contains {
                pattern,
                ignore_case: false,
            }),
            Operator::ILike => Ok(ValueTest::Contains {
                pattern: pattern.to_lowercase(),
                ignore_case: true,
            }),
            Operator::NotLike => Ok(ValueTest::Not(Box::new(ValueTest::Contains {
                pattern,
                ignore_case: false,
            }))),
            other => Err(unhandled(other, "value")),
        }
    }
}

impl ColumnStrategy for PatternStrategy {
    fn name(&self) -> &'static str {
        "column pattern"
    }

    fn can_handle(&self, op: Operator) -> bool {
        matches!(op, Operator::ColumnLike | Operator::ColumnILike)
    }

    fn build_column_predicate(
        &self,
        op: Operator,
        left: &FieldDescriptor,
        right: &FieldDescriptor,
    ) -> Result<ColumnTest> {
        require_string(op, left)?;
        require_string(op, right)?;
        match op {
            Operator::ColumnLike => Ok(ColumnTest::Contains { ignore_case: false }),
            Operator::ColumnILike => Ok(ColumnTest::Contains { ignore_case: true }),
            other => Err(unhandled(other, "column")),
        }
    }
}
