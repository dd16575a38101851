//! Error types for expression evaluation.

use crate::access::DataType;
use thiserror::Error;

/// Errors that can occur during expression evaluation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    /// Invalid operand types for operator
    #[error("Invalid operand types for operator {operator}: left={left_type:?}, right={right_type:?}")]
    InvalidOperandTypes {
        operator: String,
        left_type: Option<DataType>,
        right_type: Option<DataType>,
    },

    /// Column name not present in the row
    #[error("Unknown column: {name}")]
    UnknownColumn { name: String },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Integer overflow in operator {operator}")]
    IntegerOverflow { operator: String },

    /// Bitwise operators need byte sequences of one length
    #[error("Bitwise operator {operator} requires equal-length operands, got {left} and {right} bytes")]
    BitwiseLengthMismatch {
        operator: String,
        left: usize,
        right: usize,
    },

    /// Construct that parses but has no evaluation semantics
    #[error("{construct} is not supported in expression evaluation")]
    Unsupported { construct: String },

    /// Structurally invalid expression; indicates a defect upstream
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ExpressionError {
    /// Whether this error signals a programming defect rather than bad input
    pub fn is_internal(&self) -> bool {
        matches!(self, ExpressionError::Internal { .. })
    }
}

/// Result type for expression operations
pub type ExpressionResult<T> = Result<T, ExpressionError>;
