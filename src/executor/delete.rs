//! DELETE executor.

use crate::access::Table;
use crate::executor::{matching_rows, ExecutionResult};
use crate::expression::Expression;
use log::debug;

pub struct DeleteExecutor<'a> {
    table: &'a mut Table,
    predicate: Option<&'a Expression>,
}

impl<'a> DeleteExecutor<'a> {
    pub fn new(table: &'a mut Table, predicate: Option<&'a Expression>) -> Self {
        Self { table, predicate }
    }

    /// Remove every qualifying row, returning the count
    pub fn execute(self) -> ExecutionResult<usize> {
        let targets = matching_rows(self.table, self.predicate)?;
        for row in &targets {
            self.table.delete_row(row);
        }

        debug!("Deleted {} rows from {}", targets.len(), self.table.name());
        Ok(targets.len())
    }
}
