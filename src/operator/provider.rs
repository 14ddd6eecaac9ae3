//! Strategy registry

use crate::error::{QueryMatrixError, Result};
use crate::operator::catalog::{Operator, OperatorKind};
use crate::operator::strategy::{
    ColumnStrategy, ComparisonStrategy, InStrategy, NotInStrategy, PatternStrategy, ValueStrategy,
};
use std::fmt;
use std::sync::Arc;

/// Ordered value and column strategies; the first match wins
#[derive(Clone)]
pub struct StrategyProvider {
    value: Vec<Arc<dyn ValueStrategy>>,
    column: Vec<Arc<dyn ColumnStrategy>>,
}

impl StrategyProvider {
    /// Provider with nothing registered
    pub fn empty() -> Self {
        Self {
            value: Vec::new(),
            column: Vec::new(),
        }
    }

    pub fn register_value(&mut self, strategy: Arc<dyn ValueStrategy>) -> &mut Self {
        self.value.push(strategy);
        self
    }

    pub fn register_column(&mut self, strategy: Arc<dyn ColumnStrategy>) -> &mut Self {
        self.column.push(strategy);
        self
    }

    /// Strategy for a field-vs-constant operator
    pub fn value_strategy_for(&self, op: Operator) -> Result<&dyn ValueStrategy> {
        match op.kind() {
            OperatorKind::Comparison | OperatorKind::Text => self
                .value
                .iter()
                .find(|strategy| strategy.can_handle(op))
                .map(|strategy| strategy.as_ref())
                .ok_or_else(|| unsupported(op, "value")),
            OperatorKind::Null | OperatorKind::ColumnComparison | OperatorKind::Logical => {
                Err(unsupported(op, "value"))
            }
        }
    }

    /// Strategy for a field-vs-field operator
    pub fn column_strategy_for(&self, op: Operator) -> Result<&dyn ColumnStrategy> {
        match op.kind() {
            OperatorKind::ColumnComparison => self
                .column
                .iter()
                .find(|strategy| strategy.can_handle(op))
                .map(|strategy| strategy.as_ref())
                .ok_or_else(|| unsupported(op, "column")),
            OperatorKind::Comparison
            | OperatorKind::Text
            | OperatorKind::Null
            | OperatorKind::Logical => Err(unsupported(op, "column")),
        }
    }
}

fn unsupported(op: Operator, context: &'static str) -> QueryMatrixError {
    QueryMatrixError::UnsupportedOperator {
        operator: op.code(),
        context,
    }
}

impl Default for StrategyProvider {
    /// Built-in comparison, membership and pattern strategies
    fn default() -> Self {
        let mut provider = Self::empty();

        for comparison in [
            ComparisonStrategy::equal(),
            ComparisonStrategy::not_equal(),
            ComparisonStrategy::greater_than(),
            ComparisonStrategy::less_than(),
            ComparisonStrategy::greater_than_or_equal(),
            ComparisonStrategy::less_than_or_equal(),
        ] {
            let shared = Arc::new(comparison);
            provider.register_value(shared.clone());
            provider.register_column(shared);
        }

        let pattern = Arc::new(PatternStrategy);
        provider
            .register_value(Arc::new(InStrategy))
            .register_value(Arc::new(NotInStrategy))
            .register_value(pattern.clone())
            .register_column(pattern);

        provider
    }
}

impl fmt::Debug for StrategyProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategyProvider")
            .field(
                "value",
                &self.value.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .field(
                "column",
                &self.column.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
