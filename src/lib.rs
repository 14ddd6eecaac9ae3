//! Query Matrix - typed filter trees compiled into record predicates
//!
//! A [`QueryMatrix`] is a tree of field conditions combined with `_and`,
//! `_or` and `_not`. It can be built in code or decoded from its JSON wire
//! format, then compiled against any type implementing [`Record`] into a
//! [`Predicate`] that filters in-memory collections.
//!
//! ```ignore
//! let matrix = QueryMatrixBuilder::new()
//!     .add_condition("Price", Operator::GreaterThan, 20)
//!     .add_condition("Price", Operator::LessThan, 1000)
//!     .build()?;
//! let cheap_enough = query_matrix::apply_slice(&products, &matrix)?;
//! ```

pub mod coerce;
pub mod compile;
pub mod config;
pub mod error;
pub mod matrix;
pub mod metadata;
pub mod operator;
pub mod record;

#[cfg(test)]
mod fixtures;

pub use compile::{apply, apply_slice, compile, compile_with, Compiler, Filtered, Predicate};
pub use config::{CompileOptions, DEFAULT_MAX_DEPTH};
pub use error::{QueryMatrixError, Result};
pub use matrix::{Condition, ConditionValue, QueryMatrix, QueryMatrixBuilder, Scalar};
pub use operator::{LogicalOperator, Operator, OperatorKind, StrategyProvider};
pub use record::{EnumType, FieldDescriptor, FieldType, Record, Schema, Value};
