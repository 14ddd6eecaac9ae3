//! Filter trees
//!
//! A [`QueryMatrix`] combines leaf [`Condition`]s and nested matrices with a
//! single logical operator. Matrices are plain immutable values; they can be
//! built fluently with [`QueryMatrixBuilder`] or decoded from JSON.

mod ast;
mod builder;
pub mod wire;


pub use ast::*;
pub use builder::QueryMatrixBuilder;
