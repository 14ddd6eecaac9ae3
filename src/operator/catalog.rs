//! Operator catalog

use crate::error::{QueryMatrixError, Result};
use std::fmt;
use std::str::FromStr;

/// Operator families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    Comparison,
    Text,
    Null,
    ColumnComparison,
    Logical,
}

/// Every operator a condition or matrix can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `_eq`
    Equal,
    /// `_neq`
    NotEqual,
    /// `_gt`
    GreaterThan,
    /// `_lt`
    LessThan,
    /// `_gte`
    GreaterThanOrEqual,
    /// `_lte`
    LessThanOrEqual,
    /// `_in`
    In,
    /// `_nin`
    NotIn,
    /// `_like`
    Like,
    /// `_ilike`
    ILike,
    /// `_nlike`
    NotLike,
    /// `_similar`
    Similar,
    /// `_nsimilar`
    NotSimilar,
    /// `_regex`
    Regex,
    /// `_iregex`
    IRegex,
    /// `_is_null`
    IsNull,
    /// `_ceq`
    ColumnEqual,
    /// `_cne`
    ColumnNotEqual,
    /// `_cgt`
    ColumnGreaterThan,
    /// `_clt`
    ColumnLessThan,
    /// `_cgte`
    ColumnGreaterThanOrEqual,
    /// `_clte`
    ColumnLessThanOrEqual,
    /// `_clike`
    ColumnLike,
    /// `_cilike`
    ColumnILike,
    /// `_and`
    And,
    /// `_or`
    Or,
    /// `_not`
    Not,
}

impl Operator {
    /// Full catalog, in canonical order
    pub const ALL: [Operator; 27] = [
        Operator::Equal,
        Operator::NotEqual,
        Operator::GreaterThan,
        Operator::LessThan,
        Operator::GreaterThanOrEqual,
        Operator::LessThanOrEqual,
        Operator::In,
        Operator::NotIn,
        Operator::Like,
        Operator::ILike,
        Operator::NotLike,
        Operator::Similar,
        Operator::NotSimilar,
        Operator::Regex,
        Operator::IRegex,
        Operator::IsNull,
        Operator::ColumnEqual,
        Operator::ColumnNotEqual,
        Operator::ColumnGreaterThan,
        Operator::ColumnLessThan,
        Operator::ColumnGreaterThanOrEqual,
        Operator::ColumnLessThanOrEqual,
        Operator::ColumnLike,
        Operator::ColumnILike,
        Operator::And,
        Operator::Or,
        Operator::Not,
    ];

    /// Canonical wire code
    pub const fn code(self) -> &'static str {
        match self {
            Operator::Equal => "_eq",
            Operator::NotEqual => "_neq",
            Operator::GreaterThan => "_gt",
            Operator::LessThan => "_lt",
            Operator::GreaterThanOrEqual => "_gte",
            Operator::LessThanOrEqual => "_lte",
            Operator::In => "_in",
            Operator::NotIn => "_nin",
            Operator::Like => "_like",
            Operator::ILike => "_ilike",
            Operator::NotLike => "_nlike",
            Operator::Similar => "_similar",
            Operator::NotSimilar => "_nsimilar",
            Operator::Regex => "_regex",
            Operator::IRegex => "_iregex",
            Operator::IsNull => "_is_null",
            Operator::ColumnEqual => "_ceq",
            Operator::ColumnNotEqual => "_cne",
            Operator::ColumnGreaterThan => "_cgt",
            Operator::ColumnLessThan => "_clt",
            Operator::ColumnGreaterThanOrEqual => "_cgte",
            Operator::ColumnLessThanOrEqual => "_clte",
            Operator::ColumnLike => "_clike",
            Operator::ColumnILike => "_cilike",
            Operator::And => "_and",
            Operator::Or => "_or",
            Operator::Not => "_not",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Operator::Equal => "equals",
            Operator::NotEqual => "not equals",
            Operator::GreaterThan => "greater than",
            Operator::LessThan => "less than",
            Operator::GreaterThanOrEqual => "greater than or equal",
            Operator::LessThanOrEqual => "less than or equal",
            Operator::In => "in array",
            Operator::NotIn => "not in array",
            Operator::Like => "pattern match",
            Operator::ILike => "case insensitive pattern match",
            Operator::NotLike => "pattern not match",
            Operator::Similar => "similar to",
            Operator::NotSimilar => "not similar to",
            Operator::Regex => "regex match",
            Operator::IRegex => "case insensitive regex match",
            Operator::IsNull => "is null check",
            Operator::ColumnEqual => "column equals",
            Operator::ColumnNotEqual => "column not equals",
            Operator::ColumnGreaterThan => "column greater than",
            Operator::ColumnLessThan => "column less than",
            Operator::ColumnGreaterThanOrEqual => "column greater than or equal",
            Operator::ColumnLessThanOrEqual => "column less than or equal",
            Operator::ColumnLike => "column pattern match",
            Operator::ColumnILike => "column case insensitive pattern match",
            Operator::And => "logical and",
            Operator::Or => "logical or",
            Operator::Not => "logical not",
        }
    }

    pub const fn kind(self) -> OperatorKind {
        match self {
            Operator::Equal
            | Operator::NotEqual
            | Operator::GreaterThan
            | Operator::LessThan
            | Operator::GreaterThanOrEqual
            | Operator::LessThanOrEqual
            | Operator::In
            | Operator::NotIn => OperatorKind::Comparison,
            Operator::Like
            | Operator::ILike
            | Operator::NotLike
            | Operator::Similar
            | Operator::NotSimilar
            | Operator::Regex
            | Operator::IRegex => OperatorKind::Text,
            Operator::IsNull => OperatorKind::Null,
            Operator::ColumnEqual
            | Operator::ColumnNotEqual
            | Operator::ColumnGreaterThan
            | Operator::ColumnLessThan
            | Operator::ColumnGreaterThanOrEqual
            | Operator::ColumnLessThanOrEqual
            | Operator::ColumnLike
            | Operator::ColumnILike => OperatorKind::ColumnComparison,
            Operator::And | Operator::Or | Operator::Not => OperatorKind::Logical,
        }
    }

    #[inline]
    pub const fn is_logical(self) -> bool {
        matches!(self.kind(), OperatorKind::Logical)
    }

    #[inline]
    pub const fn is_text(self) -> bool {
        matches!(self.kind(), OperatorKind::Text)
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        matches!(self.kind(), OperatorKind::Null)
    }

    #[inline]
    pub const fn is_column_operation(self) -> bool {
        matches!(self.kind(), OperatorKind::ColumnComparison)
    }

    /// Ordering comparisons in either the value or column family
    pub const fn is_ordering(self) -> bool {
        matches!(
            self,
            Operator::GreaterThan
                | Operator::LessThan
                | Operator::GreaterThanOrEqual
                | Operator::LessThanOrEqual
                | Operator::ColumnGreaterThan
                | Operator::ColumnLessThan
                | Operator::ColumnGreaterThanOrEqual
                | Operator::ColumnLessThanOrEqual
        )
    }
}

/// Look up an operator by its wire code
pub fn resolve(code: &str) -> Result<Operator> {
    Operator::ALL
        .iter()
        .copied()
        .find(|op| op.code() == code)
        .ok_or_else(|| QueryMatrixError::UnknownOperator(code.to_string()))
}

impl FromStr for Operator {
    type Err = QueryMatrixError;

    fn from_str(s: &str) -> Result<Self> {
        resolve(s)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Operators a matrix may combine its children with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LogicalOperator {
    #[default]
    And,
    Or,
    Not,
}

impl LogicalOperator {
    pub const fn operator(self) -> Operator {
        match self {
            LogicalOperator::And => Operator::And,
            LogicalOperator::Or => Operator::Or,
            LogicalOperator::Not => Operator::Not,
        }
    }

    #[inline]
    pub const fn code(self) -> &'static str {
        self.operator().code()
    }

    /// Resolve a logical wire code; non-logical codes are rejected
    pub fn resolve(code: &str) -> Result<Self> {
        LogicalOperator::try_from(resolve(code)?)
    }
}

impl TryFrom<Operator> for LogicalOperator {
    type Error = QueryMatrixError;

    fn try_from(op: Operator) -> Result<Self> {
        match op {
            Operator::And => Ok(LogicalOperator::And),
            Operator::Or => Ok(LogicalOperator::Or),
            Operator::Not => Ok(LogicalOperator::Not),
            other => Err(QueryMatrixError::InvalidCondition(format!(
                "Operator '{}' is not a logical operator",
                other.code()
            ))),
        }
    }
}

impl From<LogicalOperator> for Operator {
    fn from(op: LogicalOperator) -> Self {
        op.operator()
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
