//! DROP TABLE executor.

use crate::database::Database;
use crate::executor::{ExecutionResult, QueryResult};
use crate::sql::DropTableStatement;
use log::debug;

pub struct DropTableExecutor<'a> {
    stmt: &'a DropTableStatement,
}

impl<'a> DropTableExecutor<'a> {
    pub fn new(stmt: &'a DropTableStatement) -> Self {
        Self { stmt }
    }

    pub fn execute(&self, db: &mut Database) -> ExecutionResult<QueryResult> {
        if self.stmt.if_exists && !db.has_table(&self.stmt.table) {
            debug!("Table {} does not exist, skipping", self.stmt.table);
            return Ok(QueryResult::Dropped);
        }

        db.drop_table(&self.stmt.table)?;
        Ok(QueryResult::Dropped)
    }
}
