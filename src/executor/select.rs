//! SELECT executor: scan, optional filter and projection.

use crate::database::Database;
use crate::executor::{
    ExecutionResult, Executor, FilterExecutor, ProjectionExecutor, QueryResult, SeqScanExecutor,
};
use crate::sql::{Projection, SelectStatement};
use log::debug;

pub struct SelectExecutor<'a> {
    stmt: &'a SelectStatement,
}

impl<'a> SelectExecutor<'a> {
    pub fn new(stmt: &'a SelectStatement) -> Self {
        Self { stmt }
    }

    pub fn execute(&self, db: &Database) -> ExecutionResult<QueryResult> {
        let table = db.table(&self.stmt.from)?;

        let mut executor: Box<dyn Executor + '_> = Box::new(SeqScanExecutor::new(table));
        if let Some(predicate) = &self.stmt.where_clause {
            executor = Box::new(FilterExecutor::new(executor, predicate.clone()));
        }
        if let Projection::Columns(columns) = &self.stmt.projection {
            executor = Box::new(ProjectionExecutor::new(executor, columns.clone()));
        }

        executor.init()?;
        let columns = executor
            .output_schema()
            .iter()
            .map(|col| col.name.clone())
            .collect();
        let mut rows = Vec::new();
        while let Some(row) = executor.next()? {
            rows.push(row.values().to_vec());
        }

        debug!("Selected {} rows from {}", rows.len(), self.stmt.from);
        Ok(QueryResult::Rows { columns, rows })
    }
}
