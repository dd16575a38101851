//! Expression tree and evaluator.
//!
//! This module provides:
//! - The expression AST produced by the SQL expression parser
//! - Operator definitions shared by the parser and evaluator
//! - Evaluation against anything that maps column names to values

pub mod error;
pub mod eval;
pub mod expr;
pub mod operator;

pub use error::{ExpressionError, ExpressionResult};
pub use eval::{
    apply_unary_operator, evaluate, evaluate_binary_op, evaluate_predicate, simplify,
    ExpressionEvaluator, RowSource,
};
pub use expr::{ColumnAddress, Expression, Literal};
pub use operator::{BinaryOperator, PatternKind, UnaryOperator};
