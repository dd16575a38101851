//! INSERT executor.
//!
//! Every row of the statement is built and validated before the first one is
//! filed in the table. A constraint that only trips during insertion (such as
//! a UNIQUE clash between two rows of the same statement) rolls back the rows
//! already inserted.

use crate::access::{AccessError, Row, Table, Value};
use crate::executor::{ExecutionError, ExecutionResult};
use crate::expression::{simplify, Expression};
use log::{debug, warn};
use std::collections::HashMap;

pub struct InsertExecutor<'a> {
    table: &'a mut Table,
    columns: Option<&'a [String]>,
    values: &'a [Vec<Expression>],
}

impl<'a> InsertExecutor<'a> {
    /// `columns` of `None` targets every column in table order
    pub fn new(
        table: &'a mut Table,
        columns: Option<&'a [String]>,
        values: &'a [Vec<Expression>],
    ) -> Self {
        Self {
            table,
            columns,
            values,
        }
    }

    /// Insert all rows, returning how many were inserted
    pub fn execute(self) -> ExecutionResult<usize> {
        let columns = self.target_columns()?;

        let mut rows = Vec::with_capacity(self.values.len());
        for (index, exprs) in self.values.iter().enumerate() {
            if exprs.len() != columns.len() {
                return Err(ExecutionError::ValueCountMismatch {
                    row: index + 1,
                    expected: columns.len(),
                    found: exprs.len(),
                });
            }
            let mut fields = HashMap::with_capacity(columns.len());
            for (column, expr) in columns.iter().zip(exprs) {
                fields.insert(column.clone(), literal_value(column, expr)?);
            }
            rows.push(self.table.construct_row(&fields)?);
        }

        let mut inserted: Vec<Row> = Vec::with_capacity(rows.len());
        for row in rows {
            if let Err(err) = self.table.insert_row(row.clone()) {
                warn!(
                    "Insert into {} failed after {} rows, rolling back: {}",
                    self.table.name(),
                    inserted.len(),
                    err
                );
                for done in &inserted {
                    self.table.delete_row(done);
                }
                return Err(err.into());
            }
            inserted.push(row);
        }

        debug!("Inserted {} rows into {}", inserted.len(), self.table.name());
        Ok(inserted.len())
    }

    fn target_columns(&self) -> ExecutionResult<Vec<String>> {
        let Some(columns) = self.columns else {
            return Ok(self.table.column_names().to_vec());
        };

        let unknown: Vec<String> = columns
            .iter()
            .filter(|name| !self.table.has_column(name))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(AccessError::UnknownColumns {
                table: self.table.name().to_string(),
                columns: unknown,
            }
            .into());
        }
        Ok(columns.to_vec())
    }
}

/// Reduce an insert value to a literal with one simplification step
fn literal_value(column: &str, expr: &Expression) -> ExecutionResult<Value> {
    match simplify(expr.unwrap_group()) {
        Expression::Literal(lit) => Ok(lit.value),
        other => Err(ExecutionError::NonLiteralValue {
            column: column.to_string(),
            expression: format!("{:?}", other),
        }),
    }
}
