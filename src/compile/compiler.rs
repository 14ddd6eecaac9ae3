//! Matrix to predicate compilation

use crate::coerce::coerce;
use crate::compile::predicate::Predicate;
use crate::config::CompileOptions;
use crate::error::{QueryMatrixError, Result};
use crate::matrix::{Condition, QueryMatrix};
use crate::operator::{LogicalOperator, StrategyProvider};
use crate::record::{field_map, FieldMap, Record};
use smallvec::SmallVec;
use std::sync::Arc;

/// Fragments of one matrix node; most nodes have only a few children
type Fragments<R> = SmallVec<[Predicate<R>; 4]>;

/// Compiles matrices against a strategy provider
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    provider: Arc<StrategyProvider>,
    options: CompileOptions,
}

impl Compiler {
    pub fn new(provider: StrategyProvider, options: CompileOptions) -> Self {
        Self {
            provider: Arc::new(provider),
            options,
        }
    }

    /// Built-in strategies with custom options
    pub fn with_options(options: CompileOptions) -> Self {
        Self {
            provider: Arc::default(),
            options,
        }
    }

    /// Same strategies, different options
    pub fn reconfigure(&self, options: CompileOptions) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            options,
        }
    }

    /// Compile `matrix` into a predicate over `R`
    pub fn compile<R: Record>(&self, matrix: &QueryMatrix) -> Result<Predicate<R>> {
        let fields = field_map::<R>();
        tracing::debug!(
            record = fields.record_name(),
            logical_operator = %matrix.logical_operator(),
            conditions = matrix.conditions().len(),
            nested = matrix.nested_matrices().len(),
            "compiling query matrix"
        );

        let predicate = self.build_matrix(matrix, &fields, 0)?;

        tracing::debug!(
            record = fields.record_name(),
            leaves = predicate.leaf_count(),
            "compiled query matrix"
        );
        Ok(predicate)
    }

    fn build_matrix<R: Record>(
        &self,
        matrix: &QueryMatrix,
        fields: &FieldMap<R>,
        depth: usize,
    ) -> Result<Predicate<R>> {
        if depth >= self.options.max_depth {
            return Err(QueryMatrixError::DepthExceeded {
                max_depth: self.options.max_depth,
            });
        }

        let mut fragments = Fragments::<R>::new();
        for condition in matrix.conditions() {
            fragments.push(self.build_condition(condition, fields)?);
        }
        for nested in matrix.nested_matrices() {
            fragments.push(self.build_matrix(nested, fields, depth + 1)?);
        }

        combine(fragments, matrix.logical_operator())
    }

    fn build_condition<R: Record>(
        &self,
        condition: &Condition,
        fields: &FieldMap<R>,
    ) -> Result<Predicate<R>> {
        let field = fields.accessor(condition.field())?;
        let op = condition.operator();

        if op.is_column_operation() {
            let other = condition
                .compare_to_column()
                .filter(|name| !name.trim().is_empty())
                .ok_or_else(|| {
                    QueryMatrixError::InvalidCondition(format!(
                        "Operator '{}' on '{}' requires a column to compare to",
                        op.code(),
                        condition.field()
                    ))
                })?;
            let other = fields.accessor(other)?;
            let strategy = self.provider.column_strategy_for(op)?;
            let test = strategy.build_column_predicate(op, field.descriptor(), other.descriptor())?;
            return Ok(Predicate::Column {
                left: field,
                right: other,
                test,
            });
        }

        if op.is_null() {
            return Ok(Predicate::IsNull(field));
        }

        let strategy = self.provider.value_strategy_for(op)?;
        let value = condition.value();
        if strategy.expects_collection() != value.is_collection() {
            let message = if strategy.expects_collection() {
                format!(
                    "Operator '{}' on '{}' requires an array value, got {}",
                    op.code(),
                    condition.field(),
                    value.kind_name()
                )
            } else {
                format!(
                    "Array values are not valid with operator '{}' on '{}'",
                    op.code(),
                    condition.field()
                )
            };
            return Err(QueryMatrixError::InvalidCondition(message));
        }

        let constant = coerce(value, &strategy.operand_type(field.descriptor()))?;
        let test = strategy.build_value_predicate(op, field.descriptor(), constant)?;
        Ok(Predicate::Value { field, test })
    }
}

/// Zero fragments match everything; `_not` needs exactly one
fn combine<R>(fragments: Fragments<R>, op: LogicalOperator) -> Result<Predicate<R>> {
    let count = fragments.len();
    let mut fragments = fragments.into_iter();
    match (op, fragments.next()) {
        (_, None) => Ok(Predicate::Constant(true)),
        (LogicalOperator::Not, Some(only)) if count == 1 => Ok(Predicate::Not(Box::new(only))),
        (LogicalOperator::Not, Some(_)) => Err(QueryMatrixError::InvalidCondition(format!(
            "'{}' requires exactly one operand, found {}",
            op.code(),
            count
        ))),
        (_, Some(only)) if count == 1 => Ok(only),
        (LogicalOperator::And, Some(first)) => {
            Ok(Predicate::And(std::iter::once(first).chain(fragments).collect()))
        }
        (LogicalOperator::Or, Some(first)) => {
            Ok(Predicate::Or(std::iter::once(first).chain(fragments).collect()))
        }
    }
}
