//! UPDATE executor.

use crate::access::{AccessError, Row, Table, Value};
use crate::executor::{matching_rows, ExecutionError, ExecutionResult};
use crate::expression::{evaluate, Expression};
use crate::sql::Assignment;
use log::{debug, warn};
use std::collections::HashMap;

pub struct UpdateExecutor<'a> {
    table: &'a mut Table,
    assignments: &'a [Assignment],
    predicate: Option<&'a Expression>,
}

impl<'a> UpdateExecutor<'a> {
    pub fn new(
        table: &'a mut Table,
        assignments: &'a [Assignment],
        predicate: Option<&'a Expression>,
    ) -> Self {
        Self {
            table,
            assignments,
            predicate,
        }
    }

    /// Apply the assignments to every qualifying row, returning the count.
    /// Either every target is updated or the table is left as it was.
    pub fn execute(self) -> ExecutionResult<usize> {
        self.check_columns()?;

        // Targets are fixed before the table changes
        let targets = matching_rows(self.table, self.predicate)?;
        let mut changes = Vec::with_capacity(targets.len());
        for row in targets {
            let fields = self.assigned_fields(&row)?;
            let new_row = self.table.construct_row(&fields)?;
            changes.push((row, new_row));
        }

        for (applied, (old, new)) in changes.iter().enumerate() {
            if let Err(err) = self.table.update_row(old, new.clone()) {
                warn!(
                    "Update of {} failed after {} rows, rolling back: {}",
                    self.table.name(),
                    applied,
                    err
                );
                for (old, new) in changes[..applied].iter().rev() {
                    if let Err(restore) = self.table.update_row(new, old.clone()) {
                        warn!("Failed to restore row {}: {}", old.id(), restore);
                    }
                }
                return Err(err.into());
            }
        }

        debug!("Updated {} rows in {}", changes.len(), self.table.name());
        Ok(changes.len())
    }

    fn check_columns(&self) -> ExecutionResult<()> {
        let unknown: Vec<String> = self
            .assignments
            .iter()
            .flat_map(|assignment| assignment.columns.iter())
            .filter(|name| !self.table.has_column(name))
            .cloned()
            .collect();
        if unknown.is_empty() {
            return Ok(());
        }
        Err(AccessError::UnknownColumns {
            table: self.table.name().to_string(),
            columns: unknown,
        }
        .into())
    }

    /// Field values of `row` after the assignments, all evaluated against `row`
    fn assigned_fields(&self, row: &Row) -> ExecutionResult<HashMap<String, Value>> {
        let mut fields = row.to_fields();
        for assignment in self.assignments {
            match assignment.columns.as_slice() {
                [column] => {
                    fields.insert(column.clone(), evaluate(&assignment.value, row)?);
                }
                columns => {
                    let Expression::Group(items) = &assignment.value else {
                        return Err(shape_error(columns));
                    };
                    if items.len() != columns.len() {
                        return Err(shape_error(columns));
                    }
                    for (column, item) in columns.iter().zip(items) {
                        fields.insert(column.clone(), evaluate(item, row)?);
                    }
                }
            }
        }
        Ok(fields)
    }
}

fn shape_error(columns: &[String]) -> ExecutionError {
    ExecutionError::AssignmentShape {
        columns: columns.to_vec(),
    }
}
