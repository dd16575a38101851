//! Filter executor implementation.
//!
//! Passes through the child's rows for which the predicate evaluates to
//! boolean true. NULL and false both reject a row.

use crate::access::Row;
use crate::executor::{ColumnInfo, ExecutionError, ExecutionResult, Executor};
use crate::expression::{evaluate_predicate, Expression};

/// Executor that filters rows based on an expression
pub struct FilterExecutor<'a> {
    child: Box<dyn Executor + 'a>,
    predicate: Expression,
    output_schema: Vec<ColumnInfo>,
    initialized: bool,
}

impl<'a> FilterExecutor<'a> {
    pub fn new(child: Box<dyn Executor + 'a>, predicate: Expression) -> Self {
        Self {
            child,
            predicate,
            output_schema: Vec::new(),
            initialized: false,
        }
    }
}

impl Executor for FilterExecutor<'_> {
    fn init(&mut self) -> ExecutionResult<()> {
        if self.initialized {
            return Ok(());
        }

        self.child.init()?;
        self.output_schema = self.child.output_schema().to_vec();
        self.initialized = true;
        Ok(())
    }

    fn next(&mut self) -> ExecutionResult<Option<Row>> {
        if !self.initialized {
            return Err(ExecutionError::NotInitialized);
        }

        while let Some(row) = self.child.next()? {
            if evaluate_predicate(&self.predicate, &row)? {
                return Ok(Some(row));
            }
        }
        Ok(None)
    }

    fn output_schema(&self) -> &[ColumnInfo] {
        &self.output_schema
    }
}
