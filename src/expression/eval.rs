//! Expression evaluation implementation.

use crate::access::Value;
use crate::expression::{
    BinaryOperator, ColumnAddress, Expression, ExpressionError, ExpressionResult, Literal,
    UnaryOperator,
};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Anything that can resolve a column name to a value
pub trait RowSource {
    fn column_value(&self, name: &str) -> Option<&Value>;
}

impl RowSource for HashMap<String, Value> {
    fn column_value(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

/// Evaluator for expressions against a single row
pub struct ExpressionEvaluator<'a, R: RowSource + ?Sized> {
    row: &'a R,
}

impl<'a, R: RowSource + ?Sized> ExpressionEvaluator<'a, R> {
    pub fn new(row: &'a R) -> Self {
        Self { row }
    }

    /// Evaluate an expression and return the result
    pub fn evaluate(&self, expr: &Expression) -> ExpressionResult<Value> {
        match expr {
            Expression::Literal(lit) => Ok(lit.value.clone()),

            Expression::ColumnRef(address) => self.evaluate_column_ref(address),

            Expression::Unary { op, operand } => match apply_unary_operator(*op, operand) {
                Some(folded) => self.evaluate(&folded),
                // Not locally foldable: the operator is dropped
                None => self.evaluate(operand),
            },

            Expression::Binary { op, left, right } => {
                let left_val = self.evaluate(left)?;
                let right_val = self.evaluate(right)?;
                evaluate_binary_op(*op, left_val, right_val)
            }

            Expression::Group(items) => match items.as_slice() {
                [only] => self.evaluate(only),
                _ => Err(ExpressionError::Internal {
                    message: format!("cannot evaluate a group of {} expressions", items.len()),
                }),
            },

            Expression::PatternMatch { kind, .. } => Err(ExpressionError::Unsupported {
                construct: kind.as_str().to_string(),
            }),

            Expression::NullTest { operand, negated } => {
                let value = self.evaluate(operand)?;
                Ok(Value::Boolean(value.is_null() != *negated))
            }

            Expression::IsComparison {
                left,
                right,
                negated,
                distinct,
            } => {
                let left_val = self.evaluate(left)?;
                let right_val = self.evaluate(right)?;
                let equal = left_val.loosely_equals(&right_val);
                Ok(Value::Boolean((equal != *distinct) != *negated))
            }

            Expression::Between {
                subject,
                negated,
                low,
                high,
            } => {
                let subject = self.evaluate(subject)?;
                let low = self.evaluate(low)?;
                let high = self.evaluate(high)?;
                if subject.is_null() || low.is_null() || high.is_null() {
                    return Ok(Value::Null);
                }
                let above = order(BinaryOperator::Le, &low, &subject)? != Ordering::Greater;
                let below = order(BinaryOperator::Le, &subject, &high)? != Ordering::Greater;
                Ok(Value::Boolean((above && below) != *negated))
            }
        }
    }

    /// Evaluate a column reference; qualifiers are not used to disambiguate
    fn evaluate_column_ref(&self, address: &ColumnAddress) -> ExpressionResult<Value> {
        self.row
            .column_value(address.column_name())
            .cloned()
            .ok_or_else(|| ExpressionError::UnknownColumn {
                name: address.column_name().to_string(),
            })
    }
}

/// Single-step local simplification of a unary operator.
///
/// Folds the operator into a literal operand, or into the literal left
/// operand of a binary operand (`-1 + 2` becomes `(-1) + 2`). Anything else
/// is left alone and `None` is returned.
pub fn apply_unary_operator(op: UnaryOperator, operand: &Expression) -> Option<Expression> {
    match operand {
        Expression::Literal(lit) => fold_literal(op, lit).map(Expression::Literal),
        Expression::Binary {
            op: binary_op,
            left,
            right,
        } => match left.as_ref() {
            Expression::Literal(lit) => fold_literal(op, lit).map(|folded| Expression::Binary {
                op: *binary_op,
                left: Box::new(Expression::Literal(folded)),
                right: right.clone(),
            }),
            _ => None,
        },
        _ => None,
    }
}

/// Reduce an expression with the local unary simplifier, if it applies
pub fn simplify(expr: &Expression) -> Expression {
    match expr {
        Expression::Unary { op, operand } => {
            apply_unary_operator(*op, operand).unwrap_or_else(|| expr.clone())
        }
        _ => expr.clone(),
    }
}

fn fold_literal(op: UnaryOperator, lit: &Literal) -> Option<Literal> {
    let value = match (op, &lit.value) {
        (UnaryOperator::Plus, Value::Integer(_) | Value::Float(_)) => lit.value.clone(),
        (UnaryOperator::Minus, Value::Integer(i)) => Value::Integer(i.checked_neg()?),
        (UnaryOperator::Minus, Value::Float(x)) => Value::Float(-x),
        (UnaryOperator::Not, Value::Boolean(b)) => Value::Boolean(!b),
        (UnaryOperator::BitNot, Value::Bytes(bytes)) => {
            Value::Bytes(bytes.iter().map(|b| !b).collect())
        }
        _ => return None,
    };
    Some(Literal::new(value))
}

fn invalid_operands(op: BinaryOperator, left: &Value, right: &Value) -> ExpressionError {
    ExpressionError::InvalidOperandTypes {
        operator: op.as_str().to_string(),
        left_type: left.data_type(),
        right_type: right.data_type(),
    }
}

/// Ordering for the comparison operators; incomparable types are an error
fn order(op: BinaryOperator, left: &Value, right: &Value) -> ExpressionResult<Ordering> {
    left.compare(right)
        .ok_or_else(|| invalid_operands(op, left, right))
}

/// Evaluate a binary operation on already-evaluated operands
pub fn evaluate_binary_op(
    op: BinaryOperator,
    left: Value,
    right: Value,
) -> ExpressionResult<Value> {
    // Three-valued logic: false absorbs AND, true absorbs OR
    match op {
        BinaryOperator::And => {
            return match (&left, &right) {
                (Value::Boolean(a), Value::Boolean(b)) => Ok(Value::Boolean(*a && *b)),
                (Value::Null, Value::Boolean(false)) | (Value::Boolean(false), Value::Null) => {
                    Ok(Value::Boolean(false))
                }
                (Value::Null, Value::Null | Value::Boolean(true))
                | (Value::Boolean(true), Value::Null) => Ok(Value::Null),
                _ => Err(invalid_operands(op, &left, &right)),
            }
        }
        BinaryOperator::Or => {
            return match (&left, &right) {
                (Value::Boolean(a), Value::Boolean(b)) => Ok(Value::Boolean(*a || *b)),
                (Value::Null, Value::Boolean(true)) | (Value::Boolean(true), Value::Null) => {
                    Ok(Value::Boolean(true))
                }
                (Value::Null, Value::Null | Value::Boolean(false))
                | (Value::Boolean(false), Value::Null) => Ok(Value::Null),
                _ => Err(invalid_operands(op, &left, &right)),
            }
        }
        _ => {}
    }

    // Every other operator propagates NULL
    if left.is_null() || right.is_null() {
        return Ok(Value::Null);
    }

    match op {
        BinaryOperator::Add
        | BinaryOperator::Sub
        | BinaryOperator::Mul
        | BinaryOperator::Div
        | BinaryOperator::Mod => arithmetic(op, &left, &right),

        BinaryOperator::Concat => match (&left, &right) {
            (Value::Text(a), Value::Text(b)) => Ok(Value::Text(format!("{}{}", a, b))),
            (Value::Bytes(a), Value::Bytes(b)) => {
                Ok(Value::Bytes(a.iter().chain(b.iter()).copied().collect()))
            }
            _ => Err(invalid_operands(op, &left, &right)),
        },

        BinaryOperator::BitAnd | BinaryOperator::BitOr => match (&left, &right) {
            (Value::Bytes(a), Value::Bytes(b)) => {
                if a.len() != b.len() {
                    return Err(ExpressionError::BitwiseLengthMismatch {
                        operator: op.as_str().to_string(),
                        left: a.len(),
                        right: b.len(),
                    });
                }
                let combined = a
                    .iter()
                    .zip(b.iter())
                    .map(|(x, y)| {
                        if op == BinaryOperator::BitAnd {
                            x & y
                        } else {
                            x | y
                        }
                    })
                    .collect();
                Ok(Value::Bytes(combined))
            }
            _ => Err(invalid_operands(op, &left, &right)),
        },

        BinaryOperator::Eq => Ok(Value::Boolean(left.compare(&right) == Some(Ordering::Equal))),
        BinaryOperator::Ne => Ok(Value::Boolean(left.compare(&right) != Some(Ordering::Equal))),
        BinaryOperator::Lt => Ok(Value::Boolean(order(op, &left, &right)? == Ordering::Less)),
        BinaryOperator::Le => Ok(Value::Boolean(order(op, &left, &right)? != Ordering::Greater)),
        BinaryOperator::Gt => Ok(Value::Boolean(order(op, &left, &right)? == Ordering::Greater)),
        BinaryOperator::Ge => Ok(Value::Boolean(order(op, &left, &right)? != Ordering::Less)),

        BinaryOperator::And | BinaryOperator::Or => Err(ExpressionError::Internal {
            message: format!("{} reached null propagation", op),
        }),
    }
}

fn arithmetic(op: BinaryOperator, left: &Value, right: &Value) -> ExpressionResult<Value> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => {
            let (a, b) = (*a, *b);
            if matches!(op, BinaryOperator::Div | BinaryOperator::Mod) && b == 0 {
                return Err(ExpressionError::DivisionByZero);
            }
            let result = match op {
                BinaryOperator::Add => a.checked_add(b),
                BinaryOperator::Sub => a.checked_sub(b),
                BinaryOperator::Mul => a.checked_mul(b),
                BinaryOperator::Div => a.checked_div(b),
                _ => a.checked_rem(b),
            };
            result
                .map(Value::Integer)
                .ok_or_else(|| ExpressionError::IntegerOverflow {
                    operator: op.as_str().to_string(),
                })
        }
        (Value::Integer(_) | Value::Float(_), Value::Integer(_) | Value::Float(_)) => {
            let a = as_float(left);
            let b = as_float(right);
            if matches!(op, BinaryOperator::Div | BinaryOperator::Mod) && b == 0.0 {
                return Err(ExpressionError::DivisionByZero);
            }
            let result = match op {
                BinaryOperator::Add => a + b,
                BinaryOperator::Sub => a - b,
                BinaryOperator::Mul => a * b,
                BinaryOperator::Div => a / b,
                _ => a % b,
            };
            Ok(Value::Float(result))
        }
        _ => Err(invalid_operands(op, left, right)),
    }
}

fn as_float(value: &Value) -> f64 {
    match value {
        Value::Integer(i) => *i as f64,
        Value::Float(x) => *x,
        _ => f64::NAN,
    }
}

/// Helper function to evaluate an expression against a row
pub fn evaluate<R: RowSource + ?Sized>(expr: &Expression, row: &R) -> ExpressionResult<Value> {
    ExpressionEvaluator::new(row).evaluate(expr)
}

/// Evaluate a filter; only boolean true admits the row
pub fn evaluate_predicate<R: RowSource + ?Sized>(
    expr: &Expression,
    row: &R,
) -> ExpressionResult<bool> {
    match evaluate(expr, row)? {
        Value::Boolean(b) => Ok(b),
        Value::Null => Ok(false),
        other => Err(ExpressionError::InvalidOperandTypes {
            operator: "WHERE".to_string(),
            left_type: other.data_type(),
            right_type: None,
        }),
    }
}
