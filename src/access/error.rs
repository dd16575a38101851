//! Table and column error types.

use super::value::DataType;
use thiserror::Error;

/// Errors raised by table and column operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AccessError {
    #[error("Unknown column(s) {} in table {table}", .columns.join(", "))]
    UnknownColumns { table: String, columns: Vec<String> },

    #[error("Type mismatch for column {table}.{column}: expected {expected}, found {found}")]
    TypeMismatch {
        table: String,
        column: String,
        expected: DataType,
        found: DataType,
    },

    #[error("Column {table}.{column} cannot be NULL")]
    NotNullViolation { table: String, column: String },

    #[error("Duplicate value {value} in unique column {table}.{column}")]
    UniqueViolation {
        table: String,
        column: String,
        value: String,
    },

    #[error("Column {column} has no non-null values")]
    EmptyColumn { column: String },

    #[error("Column {column} declared more than once in table {table}")]
    DuplicateColumn { table: String, column: String },

    #[error("Table {table} must have at least one column")]
    NoColumns { table: String },
}

/// Result type for table and column operations.
pub type AccessResult<T> = Result<T, AccessError>;
