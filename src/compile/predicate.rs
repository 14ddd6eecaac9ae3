//! Compiled predicate tree

use crate::operator::{ColumnTest, ValueTest};
use crate::record::FieldAccessor;
use std::fmt;
use std::sync::Arc;

/// A compiled filter over records of type `R`.
///
/// The tree mirrors the matrix it was compiled from: clause order is
/// preserved, And/Or short-circuit left to right.
pub enum Predicate<R> {
    Constant(bool),
    Value {
        field: Arc<FieldAccessor<R>>,
        test: ValueTest,
    },
    Column {
        left: Arc<FieldAccessor<R>>,
        right: Arc<FieldAccessor<R>>,
        test: ColumnTest,
    },
    IsNull(Arc<FieldAccessor<R>>),
    And(Vec<Predicate<R>>),
    Or(Vec<Predicate<R>>),
    Not(Box<Predicate<R>>),
}

impl<R> Predicate<R> {
    /// Test one record
    pub fn evaluate(&self, record: &R) -> bool {
        match self {
            Predicate::Constant(value) => *value,
            Predicate::Value { field, test } => test.matches(&field.read(record)),
            Predicate::Column { left, right, test } => {
                test.matches(&left.read(record), &right.read(record))
            }
            Predicate::IsNull(field) => field.read(record).is_null(),
            Predicate::And(children) => children.iter().all(|child| child.evaluate(record)),
            Predicate::Or(children) => children.iter().any(|child| child.evaluate(record)),
            Predicate::Not(inner) => !inner.evaluate(record),
        }
    }

    /// Number of leaf tests, constants included
    pub fn leaf_count(&self) -> usize {
        match self {
            Predicate::And(children) | Predicate::Or(children) => {
                children.iter().map(Predicate::leaf_count).sum()
            }
            Predicate::Not(inner) => inner.leaf_count(),
            _ => 1,
        }
    }

    /// Consume into a plain closure
    pub fn into_fn(self) -> impl Fn(&R) -> bool {
        move |record| self.evaluate(record)
    }
}

impl<R> Clone for Predicate<R> {
    fn clone(&self) -> Self {
        match self {
            Predicate::Constant(value) => Predicate::Constant(*value),
            Predicate::Value { field, test } => Predicate::Value {
                field: Arc::clone(field),
                test: test.clone(),
            },
            Predicate::Column { left, right, test } => Predicate::Column {
                left: Arc::clone(left),
                right: Arc::clone(right),
                test: *test,
            },
            Predicate::IsNull(field) => Predicate::IsNull(Arc::clone(field)),
            Predicate::And(children) => Predicate::And(children.clone()),
            Predicate::Or(children) => Predicate::Or(children.clone()),
            Predicate::Not(inner) => Predicate::Not(inner.clone()),
        }
    }
}

impl<R> fmt::Debug for Predicate<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Predicate::Value { field, test } => f
                .debug_struct("Value")
                .field("field", &field.name())
                .field("test", test)
                .finish(),
            Predicate::Column { left, right, test } => f
                .debug_struct("Column")
                .field("left", &left.name())
                .field("right", &right.name())
                .field("test", test)
                .finish(),
            Predicate::IsNull(field) => f.debug_tuple("IsNull").field(&field.name()).finish(),
            Predicate::And(children) => f.debug_tuple("And").field(children).finish(),
            Predicate::Or(children) => f.debug_tuple("Or").field(children).finish(),
            Predicate::Not(inner) => f.debug_tuple("Not").field(inner).finish(),
        }
    }
}

fn join<R>(f: &mut fmt::Formatter<'_>, children: &[Predicate<R>], separator: &str) -> fmt::Result {
    f.write_str("(")?;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{}", child)?;
    }
    f.write_str(")")
}

impl<R> fmt::Display for Predicate<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Constant(value) => write!(f, "{}", value),
            Predicate::Value { field, test } => test.fmt_with(field.name(), f),
            Predicate::Column { left, right, test } => {
                write!(f, "{} {} {}", left.name(), test.symbol(), right.name())
            }
            Predicate::IsNull(field) => write!(f, "{} is null", field.name()),
            Predicate::And(children) => join(f, children, " && "),
            Predicate::Or(children) => join(f, children, " || "),
            Predicate::Not(inner) => match &**inner {
                Predicate::And(_) | Predicate::Or(_) => write!(f, "!{}", inner),
                _ => write!(f, "!({})", inner),
            },
        }
    }
}
