//! Executor error types.

use crate::access::AccessError;
use crate::expression::ExpressionError;
use crate::sql::ParseError;
use thiserror::Error;

/// Errors raised while executing a statement.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExecutionError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Expression(#[from] ExpressionError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Schema '{schema}' does not exist")]
    UnknownSchema { schema: String },

    #[error("Table '{table}' does not exist")]
    UnknownTable { table: String },

    #[error("Table '{table}' already exists")]
    TableExists { table: String },

    #[error("Column '{column}' does not exist")]
    UnknownColumn { column: String },

    #[error("Row {row} has {found} values but {expected} columns were named")]
    ValueCountMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Value for column '{column}' is not a literal: {expression}")]
    NonLiteralValue { column: String, expression: String },

    #[error("Assignment to ({}) needs a parenthesized list of {} values", .columns.join(", "), .columns.len())]
    AssignmentShape { columns: Vec<String> },

    #[error("Executor not initialized. Call init() first.")]
    NotInitialized,
}

/// Result type for statement execution.
pub type ExecutionResult<T> = Result<T, ExecutionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        let err: ExecutionError = ExpressionError::DivisionByZero.into();
        assert_eq!(err.to_string(), "Division by zero");
        assert!(std::error::Error::source(&err).is_none());

        let err: ExecutionError = AccessError::EmptyColumn {
            column: "a".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Column a has no non-null values");
    }

    #[test]
    fn test_assignment_shape_display() {
        let err = ExecutionError::AssignmentShape {
            columns: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Assignment to (a, b) needs a parenthesized list of 2 values"
        );
    }
}
