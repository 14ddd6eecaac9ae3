//! Fluent construction of query matrices

use crate::error::{QueryMatrixError, Result};
use crate::matrix::ast::{Condition, ConditionValue, QueryMatrix, Scalar};
use crate::operator::{LogicalOperator, Operator};

/// Chainable [`QueryMatrix`] builder.
///
/// Each step validates through the [`Condition`] constructors. The first
/// failure is kept and returned from [`build`](Self::build); later steps are
/// ignored once an error is recorded.
#[derive(Debug, Default)]
pub struct QueryMatrixBuilder {
    logical_operator: LogicalOperator,
    conditions: Vec<Condition>,
    nested: Vec<QueryMatrix>,
    error: Option<QueryMatrixError>,
}

impl QueryMatrixBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how children are combined; non-logical operators are reported by `build`
    pub fn with_logical_operator(mut self, op: impl Into<Operator>) -> Self {
        match LogicalOperator::try_from(op.into()) {
            Ok(logical) => self.logical_operator = logical,
            Err(err) => self.fail(err),
        }
        self
    }

    /// Compare a field against a single constant
    pub fn add_condition(self, field: &str, op: Operator, value: impl Into<Scalar>) -> Self {
        self.push(Condition::new(field, op, ConditionValue::Single(value.into())))
    }

    /// Compare a field against a substring pattern
    pub fn add_pattern(self, field: &str, op: Operator, pattern: impl Into<String>) -> Self {
        self.push(Condition::new(field, op, ConditionValue::Pattern(pattern.into())))
    }

    /// Membership test against a list of constants
    pub fn add_values<T: Into<Scalar>>(
        self,
        field: &str,
        op: Operator,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        self.push(Condition::new(field, op, ConditionValue::array(values)))
    }

    /// Arbitrary condition value, including [`ConditionValue::Null`]
    pub fn add_value(self, field: &str, op: Operator, value: ConditionValue) -> Self {
        self.push(Condition::new(field, op, value))
    }

    pub fn add_column_comparison(self, field: &str, op: Operator, other: &str) -> Self {
        self.push(Condition::column(field, op, other))
    }

    pub fn add_null_check(self, field: &str) -> Self {
        self.push(Condition::is_null(field))
    }

    pub fn add_nested_matrix(mut self, matrix: QueryMatrix) -> Self {
        if self.error.is_none() {
            self.nested.push(matrix);
        }
        self
    }

    pub fn build(self) -> Result<QueryMatrix> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(QueryMatrix::new(
                self.logical_operator,
                self.conditions,
                self.nested,
            )),
        }
    }

    fn push(mut self, condition: Result<Condition>) -> Self {
        match condition {
            Ok(condition) if self.error.is_none() => self.conditions.push(condition),
            Ok(_) => {}
            Err(err) => self.fail(err),
        }
        self
    }

    fn fail(&mut self, err: QueryMatrixError) {
        self.error.get_or_insert(err);
    }
}
