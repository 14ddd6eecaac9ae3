//! Applying compiled matrices to record collections

use crate::compile::compiler::Compiler;
use crate::compile::predicate::Predicate;
use crate::error::Result;
use crate::matrix::QueryMatrix;
use crate::record::Record;

/// Lazy filter over borrowed records
#[derive(Debug, Clone)]
pub struct Filtered<I, R> {
    records: I,
    predicate: Predicate<R>,
}

impl<I, R> Filtered<I, R> {
    pub fn new(records: I, predicate: Predicate<R>) -> Self {
        Self { records, predicate }
    }

    pub fn predicate(&self) -> &Predicate<R> {
        &self.predicate
    }
}

impl<'a, I, R> Iterator for Filtered<I, R>
where
    I: Iterator<Item = &'a R>,
    R: 'a,
{
    type Item = &'a R;

    fn next(&mut self) -> Option<&'a R> {
        let predicate = &self.predicate;
        self.records.find(|record| predicate.evaluate(record))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.records.size_hint().1)
    }
}

impl Compiler {
    /// Compile once, then filter lazily in input order
    pub fn apply<'a, R, I>(&self, records: I, matrix: &QueryMatrix) -> Result<Filtered<I::IntoIter, R>>
    where
        R: Record,
        I: IntoIterator<Item = &'a R>,
    {
        let predicate = self.compile::<R>(matrix)?;
        Ok(Filtered::new(records.into_iter(), predicate))
    }

    /// Compile once and collect every match
    pub fn apply_slice<'a, R: Record>(
        &self,
        records: &'a [R],
        matrix: &QueryMatrix,
    ) -> Result<Vec<&'a R>> {
        Ok(self.apply(records, matrix)?.collect())
    }
}
