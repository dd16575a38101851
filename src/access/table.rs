//! Table: a fixed set of indexed columns over one shared row set.

use crate::access::{AccessError, AccessResult, DataType, IndexedColumn, Row, RowId, Value};
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::Arc;

static NULL: Value = Value::Null;

#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    column_names: Arc<[String]>,
    columns: HashMap<String, IndexedColumn>,
    next_row_id: u64,
}

impl Table {
    /// Create an empty table; the column set is fixed from here on
    pub fn new(
        name: impl Into<String>,
        columns: Vec<(String, IndexedColumn)>,
    ) -> AccessResult<Self> {
        let name = name.into();
        if columns.is_empty() {
            return Err(AccessError::NoColumns { table: name });
        }

        let mut column_names = Vec::with_capacity(columns.len());
        let mut by_name = HashMap::with_capacity(columns.len());
        for (column_name, column) in columns {
            if by_name.contains_key(&column_name) {
                return Err(AccessError::DuplicateColumn {
                    table: name,
                    column: column_name,
                });
            }
            column_names.push(column_name.clone());
            by_name.insert(column_name, column);
        }

        Ok(Self {
            name,
            column_names: column_names.into(),
            columns: by_name,
            next_row_id: 0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column names in canonical row order
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn column(&self, name: &str) -> AccessResult<&IndexedColumn> {
        self.columns
            .get(name)
            .ok_or_else(|| self.unknown_columns(vec![name.to_string()]))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Number of rows, counted through the first column
    pub fn len(&self) -> usize {
        self.first_column().map_or(0, IndexedColumn::row_count)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build a row from a partial mapping of column name to value.
    ///
    /// Missing columns take their default. Values are checked against the
    /// declared type (integers widen into FLOAT columns) and NOT NULL.
    /// Names that are not columns are ignored here; `add_row` rejects them.
    pub fn construct_row(&mut self, fields: &HashMap<String, Value>) -> AccessResult<Row> {
        let mut values = Vec::with_capacity(self.column_names.len());
        for column_name in self.column_names.iter() {
            let column = self.column(column_name)?;
            let value = match fields.get(column_name) {
                Some(value) => self.check_type(column_name, column, value)?,
                None => column.default_value().clone(),
            };
            if value.is_null() && !column.is_nullable() {
                return Err(AccessError::NotNullViolation {
                    table: self.name.clone(),
                    column: column_name.clone(),
                });
            }
            values.push(value);
        }

        let id = RowId(self.next_row_id);
        self.next_row_id += 1;
        Ok(Row::new(id, Arc::clone(&self.column_names), values))
    }

    /// File `row` in every column index.
    ///
    /// Unique columns are checked before any index is touched, so a failed
    /// insert leaves the table unchanged.
    pub fn insert_row(&mut self, row: Row) -> AccessResult<()> {
        self.check_unique(&row)?;
        self.insert_unchecked(row);
        Ok(())
    }

    /// Remove `row` from every column index; columns not holding it are skipped
    pub fn delete_row(&mut self, row: &Row) {
        for (position, column_name) in self.column_names.iter().enumerate() {
            let value = row.get(position).unwrap_or(&NULL);
            if let Some(column) = self.columns.get_mut(column_name) {
                column.remove(value, row.id());
            }
        }
        debug!("Deleted row {} from {}", row.id(), self.name);
    }

    /// Replace `old` with `new`; on failure `old` is put back
    pub fn update_row(&mut self, old: &Row, new: Row) -> AccessResult<()> {
        self.delete_row(old);
        let new_id = new.id();
        if let Err(err) = self.insert_row(new) {
            warn!(
                "Update of row {} in {} failed, restoring it: {}",
                old.id(),
                self.name,
                err
            );
            self.insert_unchecked(old.clone());
            return Err(err);
        }
        debug!("Updated row {} to {} in {}", old.id(), new_id, self.name);
        Ok(())
    }

    /// Validate column names, construct the row and insert it
    pub fn add_row(&mut self, fields: &HashMap<String, Value>) -> AccessResult<Row> {
        let mut unknown: Vec<String> = fields
            .keys()
            .filter(|name| !self.has_column(name))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            unknown.sort();
            return Err(self.unknown_columns(unknown));
        }

        let row = self.construct_row(fields)?;
        self.insert_row(row.clone())?;
        Ok(row)
    }

    /// Every row, enumerated through the first column's index
    pub fn all_rows(&self) -> Vec<Row> {
        self.first_column()
            .map(|column| column.rows().cloned().collect())
            .unwrap_or_default()
    }

    /// Rows whose `column` holds exactly `value`
    pub fn lookup(&self, column: &str, value: &Value) -> AccessResult<&[Row]> {
        Ok(self.column(column)?.lookup(value))
    }

    /// Distinct keys of `column` between the bounds
    pub fn range(
        &self,
        column: &str,
        low: Option<&Value>,
        high: Option<&Value>,
        inclusive: bool,
    ) -> AccessResult<Vec<&Value>> {
        Ok(self.column(column)?.range(low, high, inclusive))
    }

    pub fn minimum(&self, column: &str) -> AccessResult<&Value> {
        self.column(column)?
            .minimum()
            .ok_or_else(|| AccessError::EmptyColumn {
                column: column.to_string(),
            })
    }

    pub fn maximum(&self, column: &str) -> AccessResult<&Value> {
        self.column(column)?
            .maximum()
            .ok_or_else(|| AccessError::EmptyColumn {
                column: column.to_string(),
            })
    }

    fn first_column(&self) -> Option<&IndexedColumn> {
        self.column_names
            .first()
            .and_then(|name| self.columns.get(name))
    }

    fn insert_unchecked(&mut self, row: Row) {
        for (position, column_name) in self.column_names.iter().enumerate() {
            let value = row.get(position).unwrap_or(&NULL);
            if let Some(column) = self.columns.get_mut(column_name) {
                column.insert(value, row.clone());
            }
        }
        debug!("Inserted row {} into {}", row.id(), self.name);
    }

    fn check_type(
        &self,
        column_name: &str,
        column: &IndexedColumn,
        value: &Value,
    ) -> AccessResult<Value> {
        match (column.data_type(), value) {
            (_, Value::Null) => Ok(Value::Null),
            (DataType::Float, Value::Integer(i)) => Ok(Value::Float(*i as f64)),
            (expected, value) => match value.data_type() {
                Some(found) if found != expected => Err(AccessError::TypeMismatch {
                    table: self.name.clone(),
                    column: column_name.to_string(),
                    expected,
                    found,
                }),
                _ => Ok(value.clone()),
            },
        }
    }

    fn check_unique(&self, row: &Row) -> AccessResult<()> {
        for (position, column_name) in self.column_names.iter().enumerate() {
            let Some(column) = self.columns.get(column_name) else {
                continue;
            };
            let Some(value) = row.get(position) else {
                continue;
            };
            if column.is_unique() && !value.is_null() && column.contains(value) {
                return Err(AccessError::UniqueViolation {
                    table: self.name.clone(),
                    column: column_name.clone(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    fn unknown_columns(&self, columns: Vec<String>) -> AccessError {
        AccessError::UnknownColumns {
            table: self.name.clone(),
            columns,
        }
    }
}
