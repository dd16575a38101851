//! Sequential scan executor implementation.

use crate::access::{Row, Table};
use crate::executor::{ColumnInfo, ExecutionError, ExecutionResult, Executor};
use std::vec::IntoIter;

/// Executor for sequential table scans
pub struct SeqScanExecutor<'a> {
    table: &'a Table,
    rows: Option<IntoIter<Row>>,
    output_schema: Vec<ColumnInfo>,
}

impl<'a> SeqScanExecutor<'a> {
    /// Create a new sequential scan executor
    pub fn new(table: &'a Table) -> Self {
        Self {
            table,
            rows: None,
            output_schema: Vec::new(),
        }
    }
}

impl Executor for SeqScanExecutor<'_> {
    fn init(&mut self) -> ExecutionResult<()> {
        if self.rows.is_some() {
            return Ok(());
        }

        self.output_schema = self
            .table
            .column_names()
            .iter()
            .map(|name| -> ExecutionResult<ColumnInfo> {
                let column = self.table.column(name)?;
                Ok(ColumnInfo::new(name.as_str(), column.data_type()))
            })
            .collect::<ExecutionResult<_>>()?;

        // Snapshot, so writers can collect targets before changing the table
        self.rows = Some(self.table.all_rows().into_iter());
        Ok(())
    }

    fn next(&mut self) -> ExecutionResult<Option<Row>> {
        let rows = self.rows.as_mut().ok_or(ExecutionError::NotInitialized)?;
        Ok(rows.next())
    }

    fn output_schema(&self) -> &[ColumnInfo] {
        &self.output_schema
    }
}
