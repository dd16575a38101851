//! Executor layer for statement execution.
//!
//! Statements run against a `Database`. Reads go through a small
//! Volcano-style pipeline (scan, filter, projection) where each executor
//! produces rows one at a time via `next()`. Writes go through the table
//! row API so every column index stays in step.

use crate::access::{DataType, Row, Table, Value};
use crate::database::Database;
use crate::expression::Expression;
use crate::sql::Statement;
use std::fmt;

pub mod create_table;
pub mod delete;
pub mod drop_table;
pub mod error;
pub mod filter;
pub mod insert;
pub mod projection;
pub mod select;
pub mod seq_scan;
pub mod update;

pub use create_table::CreateTableExecutor;
pub use delete::DeleteExecutor;
pub use drop_table::DropTableExecutor;
pub use error::{ExecutionError, ExecutionResult};
pub use filter::FilterExecutor;
pub use insert::InsertExecutor;
pub use projection::ProjectionExecutor;
pub use select::SelectExecutor;
pub use seq_scan::SeqScanExecutor;
pub use update::UpdateExecutor;

/// Trait for pull-based row producers
pub trait Executor {
    /// Initialize the executor. This must be called before `next()`.
    fn init(&mut self) -> ExecutionResult<()>;

    /// Get the next row from the executor.
    /// Returns None when there are no more rows.
    fn next(&mut self) -> ExecutionResult<Option<Row>>;

    /// Get the output schema of this executor
    fn output_schema(&self) -> &[ColumnInfo];
}

/// Information about a column in the output schema
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: DataType,
}

impl ColumnInfo {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Outcome of one statement
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    Created,
    Dropped,
    Inserted(usize),
    Updated(usize),
    Deleted(usize),
    Rows {
        columns: Vec<String>,
        rows: Vec<Vec<Value>>,
    },
}

impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryResult::Created => write!(f, "CREATE TABLE"),
            QueryResult::Dropped => write!(f, "DROP TABLE"),
            QueryResult::Inserted(n) => write!(f, "INSERT {}", n),
            QueryResult::Updated(n) => write!(f, "UPDATE {}", n),
            QueryResult::Deleted(n) => write!(f, "DELETE {}", n),
            QueryResult::Rows { columns, rows } => {
                writeln!(f, "{}", columns.join(" | "))?;
                for row in rows {
                    let cells: Vec<String> = row.iter().map(Value::to_string).collect();
                    writeln!(f, "{}", cells.join(" | "))?;
                }
                let noun = if rows.len() == 1 { "row" } else { "rows" };
                write!(f, "({} {})", rows.len(), noun)
            }
        }
    }
}

/// Execute one parsed statement
pub fn execute_statement(
    db: &mut Database,
    statement: &Statement,
) -> ExecutionResult<QueryResult> {
    match statement {
        Statement::CreateTable(stmt) => CreateTableExecutor::new(stmt).execute(db),
        Statement::DropTable(stmt) => DropTableExecutor::new(stmt).execute(db),
        Statement::Insert(stmt) => {
            let table = db.table_mut(&stmt.table)?;
            let count =
                InsertExecutor::new(table, stmt.columns.as_deref(), &stmt.values).execute()?;
            Ok(QueryResult::Inserted(count))
        }
        Statement::Select(stmt) => SelectExecutor::new(stmt).execute(db),
        Statement::Update(stmt) => {
            let table = db.table_mut(&stmt.table)?;
            let count = UpdateExecutor::new(table, &stmt.assignments, stmt.where_clause.as_ref())
                .execute()?;
            Ok(QueryResult::Updated(count))
        }
        Statement::Delete(stmt) => {
            let table = db.table_mut(&stmt.table)?;
            let count = DeleteExecutor::new(table, stmt.where_clause.as_ref()).execute()?;
            Ok(QueryResult::Deleted(count))
        }
    }
}

/// Rows of `table` admitted by `predicate` (all rows without one)
pub fn matching_rows(
    table: &Table,
    predicate: Option<&Expression>,
) -> ExecutionResult<Vec<Row>> {
    let scan: Box<dyn Executor + '_> = Box::new(SeqScanExecutor::new(table));
    let mut executor: Box<dyn Executor + '_> = match predicate {
        Some(predicate) => Box::new(FilterExecutor::new(scan, predicate.clone())),
        None => scan,
    };

    executor.init()?;
    let mut rows = Vec::new();
    while let Some(row) = executor.next()? {
        rows.push(row);
    }
    Ok(rows)
}
