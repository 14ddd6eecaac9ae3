//! Compiling query matrices into predicates
//!
//! Compilation walks the matrix depth first: conditions, then nested
//! matrices, each in declaration order. Every leaf resolves its field through
//! the accessor cache, coerces its constant to the field type and asks a
//! strategy for the test. The first error aborts the walk.

mod apply;
mod compiler;
mod predicate;


pub use apply::Filtered;
pub use compiler::Compiler;
pub use predicate::Predicate;

use crate::config::CompileOptions;
use crate::error::Result;
use crate::matrix::QueryMatrix;
use crate::record::Record;
use once_cell::sync::Lazy;

/// Shared compiler with the built-in strategies and default options
static DEFAULT_COMPILER: Lazy<Compiler> = Lazy::new(Compiler::default);

/// Compile with the built-in strategies and default options
pub fn compile<R: Record>(matrix: &QueryMatrix) -> Result<Predicate<R>> {
    DEFAULT_COMPILER.compile(matrix)
}

/// Compile with the built-in strategies and custom options
pub fn compile_with<R: Record>(matrix: &QueryMatrix, options: &CompileOptions) -> Result<Predicate<R>> {
    DEFAULT_COMPILER.reconfigure(*options).compile(matrix)
}

/// Lazily filter `records` by `matrix`
pub fn apply<'a, R, I>(records: I, matrix: &QueryMatrix) -> Result<Filtered<I::IntoIter, R>>
where
    R: Record,
    I: IntoIterator<Item = &'a R>,
{
    DEFAULT_COMPILER.apply(records, matrix)
}

/// Collect the records of `records` matching `matrix`
pub fn apply_slice<'a, R: Record>(records: &'a [R], matrix: &QueryMatrix) -> Result<Vec<&'a R>> {
    DEFAULT_COMPILER.apply_slice(records, matrix)
}
