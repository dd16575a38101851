use crate::access::Value;
use crate::expression::RowSource;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Identity of a row within its table; never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub u64);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Immutable tuple of values in a table's column order.
///
/// Every column index of a table holds a clone of the same row; clones share
/// their storage. Two rows are equal when they have the same identity, not
/// merely the same values.
#[derive(Debug, Clone)]
pub struct Row {
    id: RowId,
    column_names: Arc<[String]>,
    values: Arc<[Value]>,
}

impl Row {
    pub(crate) fn new(id: RowId, column_names: Arc<[String]>, values: Vec<Value>) -> Self {
        Self {
            id,
            column_names,
            values: values.into(),
        }
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Value at a column position
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Value of a named column
    pub fn get_by_name(&self, name: &str) -> Option<&Value> {
        self.column_names
            .iter()
            .position(|column| column == name)
            .and_then(|index| self.values.get(index))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Column name to value mapping, used as the base of an updated row
    pub fn to_fields(&self) -> HashMap<String, Value> {
        self.column_names
            .iter()
            .cloned()
            .zip(self.values.iter().cloned())
            .collect()
    }
}

impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Row {}

impl RowSource for Row {
    fn column_value(&self, name: &str) -> Option<&Value> {
        self.get_by_name(name)
    }
}
