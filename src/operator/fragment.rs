//! Record-independent predicate fragments produced by strategies

use crate::record::Value;
use std::fmt;

/// Binary comparison shared by the value and column families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

impl Comparison {
    pub const fn symbol(self) -> &'static str {
        match self {
            Comparison::Equal => "==",
            Comparison::NotEqual => "!=",
            Comparison::GreaterThan => ">",
            Comparison::LessThan => "<",
            Comparison::GreaterThanOrEqual => ">=",
            Comparison::LessThanOrEqual => "<=",
        }
    }

    pub const fn is_ordering(self) -> bool {
        !matches!(self, Comparison::Equal | Comparison::NotEqual)
    }

    /// Null equals null; null and mismatched values never order
    #[inline]
    pub fn apply(self, left: &Value, right: &Value) -> bool {
        match self {
            Comparison::Equal => left == right,
            Comparison::NotEqual => left != right,
            _ => left.compare(right).is_some_and(|ordering| match self {
                Comparison::GreaterThan => ordering.is_gt(),
                Comparison::LessThan => ordering.is_lt(),
                Comparison::GreaterThanOrEqual => ordering.is_ge(),
                Comparison::LessThanOrEqual => ordering.is_le(),
                Comparison::Equal | Comparison::NotEqual => false,
            }),
        }
    }
}

/// Test of one field against a constant
#[derive(Debug, Clone, PartialEq)]
pub enum ValueTest {
    Compare(Comparison, Value),
    /// Membership in a coerced array
    In(Vec<Value>),
    /// Substring containment; with `ignore_case` the pattern is stored lowercased
    Contains { pattern: String, ignore_case: bool },
    Not(Box<ValueTest>),
}

impl ValueTest {
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ValueTest::Compare(comparison, constant) => comparison.apply(value, constant),
            ValueTest::In(items) => items.iter().any(|item| item == value),
            ValueTest::Contains {
                pattern,
                ignore_case,
            } => match value.as_str() {
                Some(text) if *ignore_case => text.to_lowercase().contains(pattern.as_str()),
                Some(text) => text.contains(pattern.as_str()),
                None => false,
            },
            ValueTest::Not(inner) => !inner.matches(value),
        }
    }

    /// Render against a field name
    pub(crate) fn fmt_with(&self, field: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueTest::Compare(comparison, constant) => {
                write!(f, "{} {} {}", field, comparison.symbol(), constant)
            }
            ValueTest::In(items) => write!(f, "{} in {}", field, Value::Array(items.clone())),
            ValueTest::Contains {
                pattern,
                ignore_case,
            } => {
                let keyword = if *ignore_case { "ilike" } else { "like" };
                write!(f, "{} {} {:?}", field, keyword, pattern)
            }
            ValueTest::Not(inner) => {
                f.write_str("!(")?;
                inner.fmt_with(field, f)?;
                f.write_str(")")
            }
        }
    }
}

/// Test between two fields of the same record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnTest {
    Compare(Comparison),
    /// Left contains right
    Contains { ignore_case: bool },
}

impl ColumnTest {
    pub fn matches(&self, left: &Value, right: &Value) -> bool {
        match self {
            ColumnTest::Compare(comparison) => comparison.apply(left, right),
            ColumnTest::Contains { ignore_case } => match (left.as_str(), right.as_str()) {
                (Some(l), Some(r)) if *ignore_case => l.to_lowercase().contains(&r.to_lowercase()),
                (Some(l), Some(r)) => l.contains(r),
                _ => false,
            },
        }
    }

    pub(crate) fn symbol(&self) -> &'static str {
        match self {
            ColumnTest::Compare(comparison) => comparison.symbol(),
            ColumnTest::Contains { ignore_case: false } => "like",
            ColumnTest::Contains { ignore_case: true } => "ilike",
        }
    }
}
