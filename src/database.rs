use crate::access::Table;
use crate::executor::{ExecutionError, ExecutionResult};
use crate::sql::TableName;
use log::debug;
use std::collections::HashMap;

/// In-memory database: tables grouped into schemas.
///
/// The unnamed default schema always exists; named schemas are created when
/// a table is first created in them.
#[derive(Debug)]
pub struct Database {
    schemas: HashMap<Option<String>, HashMap<String, Table>>,
}

impl Database {
    pub fn new() -> Self {
        let mut schemas = HashMap::new();
        schemas.insert(None, HashMap::new());
        Self { schemas }
    }

    pub fn has_table(&self, name: &TableName) -> bool {
        self.schemas
            .get(&name.schema)
            .map_or(false, |tables| tables.contains_key(&name.name))
    }

    pub fn table(&self, name: &TableName) -> ExecutionResult<&Table> {
        self.schema(name)?
            .get(&name.name)
            .ok_or_else(|| unknown_table(name))
    }

    pub fn table_mut(&mut self, name: &TableName) -> ExecutionResult<&mut Table> {
        self.schemas
            .get_mut(&name.schema)
            .ok_or_else(|| unknown_schema(name))?
            .get_mut(&name.name)
            .ok_or_else(|| unknown_table(name))
    }

    /// Register a new table, creating its schema if needed
    pub fn create_table(&mut self, name: &TableName, table: Table) -> ExecutionResult<()> {
        let tables = self.schemas.entry(name.schema.clone()).or_default();
        if tables.contains_key(&name.name) {
            return Err(ExecutionError::TableExists {
                table: name.to_string(),
            });
        }
        tables.insert(name.name.clone(), table);
        debug!("Created table {}", name);
        Ok(())
    }

    pub fn drop_table(&mut self, name: &TableName) -> ExecutionResult<Table> {
        let table = self
            .schemas
            .get_mut(&name.schema)
            .ok_or_else(|| unknown_schema(name))?
            .remove(&name.name)
            .ok_or_else(|| unknown_table(name))?;
        debug!("Dropped table {}", name);
        Ok(table)
    }

    /// Table names in a schema, sorted
    pub fn table_names(&self, schema: Option<&str>) -> Vec<String> {
        let key = schema.map(str::to_string);
        let mut names: Vec<String> = self
            .schemas
            .get(&key)
            .map(|tables| tables.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    fn schema(&self, name: &TableName) -> ExecutionResult<&HashMap<String, Table>> {
        self.schemas
            .get(&name.schema)
            .ok_or_else(|| unknown_schema(name))
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

fn unknown_schema(name: &TableName) -> ExecutionError {
    ExecutionError::UnknownSchema {
        schema: name.schema.clone().unwrap_or_default(),
    }
}

fn unknown_table(name: &TableName) -> ExecutionError {
    ExecutionError::UnknownTable {
        table: name.to_string(),
    }
}
