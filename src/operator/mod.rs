//! Operators and the strategies that compile them
//!
//! The catalog is a closed enum with one wire code per operator. Value and
//! column operators are turned into predicate fragments by strategies looked
//! up through a [`StrategyProvider`].

mod catalog;
mod fragment;
pub mod provider;
pub mod strategy;

pub use catalog::{resolve, LogicalOperator, Operator, OperatorKind};
pub use fragment::{ColumnTest, Comparison, ValueTest};
pub use provider::StrategyProvider;
pub use strategy::{
    ColumnStrategy, ComparisonStrategy, InStrategy, NotInStrategy, PatternStrategy, ValueStrategy,
};
