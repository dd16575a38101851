//! Projection executor implementation.

use crate::access::{Row, Value};
use crate::executor::{ColumnInfo, ExecutionError, ExecutionResult, Executor};
use std::sync::Arc;

/// Executor that narrows each child row to a list of named columns
pub struct ProjectionExecutor<'a> {
    child: Box<dyn Executor + 'a>,
    columns: Vec<String>,
    /// Positions of `columns` in the child's rows
    indices: Vec<usize>,
    names: Arc<[String]>,
    output_schema: Vec<ColumnInfo>,
    initialized: bool,
}

impl<'a> ProjectionExecutor<'a> {
    pub fn new(child: Box<dyn Executor + 'a>, columns: Vec<String>) -> Self {
        let names: Arc<[String]> = columns.clone().into();
        Self {
            child,
            columns,
            indices: Vec::new(),
            names,
            output_schema: Vec::new(),
            initialized: false,
        }
    }
}

impl Executor for ProjectionExecutor<'_> {
    fn init(&mut self) -> ExecutionResult<()> {
        if self.initialized {
            return Ok(());
        }

        self.child.init()?;
        let child_schema = self.child.output_schema();

        let mut indices = Vec::with_capacity(self.columns.len());
        let mut output_schema = Vec::with_capacity(self.columns.len());
        for name in &self.columns {
            let index = child_schema
                .iter()
                .position(|col| &col.name == name)
                .ok_or_else(|| ExecutionError::UnknownColumn {
                    column: name.clone(),
                })?;
            indices.push(index);
            output_schema.push(child_schema[index].clone());
        }

        self.indices = indices;
        self.output_schema = output_schema;
        self.initialized = true;
        Ok(())
    }

    fn next(&mut self) -> ExecutionResult<Option<Row>> {
        if !self.initialized {
            return Err(ExecutionError::NotInitialized);
        }

        let Some(row) = self.child.next()? else {
            return Ok(None);
        };
        let values = self
            .indices
            .iter()
            .map(|&index| row.get(index).cloned().unwrap_or(Value::Null))
            .collect();
        Ok(Some(Row::new(row.id(), Arc::clone(&self.names), values)))
    }

    fn output_schema(&self) -> &[ColumnInfo] {
        &self.output_schema
    }
}
