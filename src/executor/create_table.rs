//! CREATE TABLE executor.

use crate::access::{AccessError, DataType, IndexedColumn, Table, Value};
use crate::database::Database;
use crate::executor::{ExecutionResult, QueryResult};
use crate::sql::{ColumnDefinition, CreateTableStatement};
use log::debug;

pub struct CreateTableExecutor<'a> {
    stmt: &'a CreateTableStatement,
}

impl<'a> CreateTableExecutor<'a> {
    pub fn new(stmt: &'a CreateTableStatement) -> Self {
        Self { stmt }
    }

    pub fn execute(&self, db: &mut Database) -> ExecutionResult<QueryResult> {
        if self.stmt.if_not_exists && db.has_table(&self.stmt.table) {
            debug!("Table {} already exists, skipping", self.stmt.table);
            return Ok(QueryResult::Created);
        }

        let table_name = &self.stmt.table.name;
        let columns = self
            .stmt
            .columns
            .iter()
            .map(|def| -> ExecutionResult<(String, IndexedColumn)> {
                Ok((def.name.clone(), build_column(table_name, def)?))
            })
            .collect::<ExecutionResult<Vec<_>>>()?;

        let table = Table::new(table_name.as_str(), columns)?;
        db.create_table(&self.stmt.table, table)?;
        Ok(QueryResult::Created)
    }
}

/// Indexed column for a definition, with its default checked against the type
fn build_column(table: &str, def: &ColumnDefinition) -> ExecutionResult<IndexedColumn> {
    let mut column = IndexedColumn::new(def.data_type);

    if let Some(default) = &def.default {
        let value = match (def.data_type, &default.value) {
            (DataType::Float, Value::Integer(i)) => Value::Float(*i as f64),
            (expected, value) => match value.data_type() {
                Some(found) if found != expected => {
                    return Err(AccessError::TypeMismatch {
                        table: table.to_string(),
                        column: def.name.clone(),
                        expected,
                        found,
                    }
                    .into());
                }
                _ => value.clone(),
            },
        };
        column = column.with_default(value);
    }
    if !def.nullable {
        column = column.not_null();
    }
    if def.is_unique() {
        column = column.unique();
    }
    Ok(column)
}
