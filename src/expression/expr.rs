//! Expression AST definitions.

use crate::access::{DataType, Value};
use crate::expression::operator::{BinaryOperator, PatternKind, UnaryOperator};
use std::fmt;

/// Constant value appearing in an expression
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub value: Value,
}

impl Literal {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    pub fn null() -> Self {
        Self { value: Value::Null }
    }

    pub fn bool(val: bool) -> Self {
        Self::new(Value::Boolean(val))
    }

    pub fn integer(val: i64) -> Self {
        Self::new(Value::Integer(val))
    }

    pub fn float(val: f64) -> Self {
        Self::new(Value::Float(val))
    }

    pub fn text(val: impl Into<String>) -> Self {
        Self::new(Value::Text(val.into()))
    }

    pub fn bytes(val: impl Into<Vec<u8>>) -> Self {
        Self::new(Value::Bytes(val.into()))
    }

    /// Type the literal was written as; `None` for NULL
    pub fn declared_type(&self) -> Option<DataType> {
        self.value.data_type()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Possibly qualified reference to a column: `[[schema.]table.]column`
///
/// A schema can only be present together with a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnAddress {
    column_name: String,
    table_name: Option<String>,
    schema_name: Option<String>,
}

impl ColumnAddress {
    pub fn new(column_name: impl Into<String>) -> Self {
        Self {
            column_name: column_name.into(),
            table_name: None,
            schema_name: None,
        }
    }

    pub fn with_table(table_name: impl Into<String>, column_name: impl Into<String>) -> Self {
        Self {
            column_name: column_name.into(),
            table_name: Some(table_name.into()),
            schema_name: None,
        }
    }

    pub fn with_schema(
        schema_name: impl Into<String>,
        table_name: impl Into<String>,
        column_name: impl Into<String>,
    ) -> Self {
        Self {
            column_name: column_name.into(),
            table_name: Some(table_name.into()),
            schema_name: Some(schema_name.into()),
        }
    }

    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    pub fn table_name(&self) -> Option<&str> {
        self.table_name.as_deref()
    }

    pub fn schema_name(&self) -> Option<&str> {
        self.schema_name.as_deref()
    }
}

impl fmt::Display for ColumnAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(schema) = &self.schema_name {
            write!(f, "{}.", schema)?;
        }
        if let Some(table) = &self.table_name {
            write!(f, "{}.", table)?;
        }
        write!(f, "{}", self.column_name)
    }
}

/// Expression tree node
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Literal constant value
    Literal(Literal),

    /// Column reference
    ColumnRef(ColumnAddress),

    /// Prefix operation: `+ - ~ NOT`
    Unary {
        op: UnaryOperator,
        operand: Box<Expression>,
    },

    /// Binary operation
    Binary {
        op: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },

    /// Parenthesized, comma-separated list; `(x)` is a one-element group
    Group(Vec<Expression>),

    /// `[NOT] LIKE | GLOB | REGEXP | MATCH`
    PatternMatch {
        negated: bool,
        kind: PatternKind,
        left: Box<Expression>,
        right: Box<Expression>,
        escape: Option<Box<Expression>>,
    },

    /// `ISNULL`, `NOTNULL`, `NOT NULL`, `IS [NOT] NULL`
    NullTest {
        operand: Box<Expression>,
        negated: bool,
    },

    /// `IS [NOT] [DISTINCT FROM]`
    IsComparison {
        left: Box<Expression>,
        right: Box<Expression>,
        negated: bool,
        distinct: bool,
    },

    /// `[NOT] BETWEEN low AND high`
    Between {
        subject: Box<Expression>,
        negated: bool,
        low: Box<Expression>,
        high: Box<Expression>,
    },
}

impl Expression {
    /// Create a literal expression
    pub fn literal(value: Value) -> Self {
        Expression::Literal(Literal::new(value))
    }

    /// Create an unqualified column reference
    pub fn column(name: impl Into<String>) -> Self {
        Expression::ColumnRef(ColumnAddress::new(name))
    }

    pub fn unary(op: UnaryOperator, operand: Expression) -> Self {
        Expression::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOperator, left: Expression, right: Expression) -> Self {
        Expression::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn group(items: Vec<Expression>) -> Self {
        Expression::Group(items)
    }

    pub fn null_test(operand: Expression, negated: bool) -> Self {
        Expression::NullTest {
            operand: Box::new(operand),
            negated,
        }
    }

    pub fn between(subject: Expression, low: Expression, high: Expression, negated: bool) -> Self {
        Expression::Between {
            subject: Box::new(subject),
            negated,
            low: Box::new(low),
            high: Box::new(high),
        }
    }

    /// Strip any number of single-element group wrappers.
    ///
    /// `((col))` and `col` yield the same node.
    pub fn unwrap_group(&self) -> &Expression {
        let mut current = self;
        while let Expression::Group(items) = current {
            match items.as_slice() {
                [only] => current = only,
                _ => break,
            }
        }
        current
    }

    /// Check if this expression is a constant (contains no column references)
    pub fn is_constant(&self) -> bool {
        match self {
            Expression::Literal(_) => true,
            Expression::ColumnRef(_) => false,
            Expression::Unary { operand, .. } => operand.is_constant(),
            Expression::Binary { left, right, .. } => left.is_constant() && right.is_constant(),
            Expression::Group(items) => items.iter().all(Expression::is_constant),
            Expression::PatternMatch {
                left,
                right,
                escape,
                ..
            } => {
                left.is_constant()
                    && right.is_constant()
                    && escape.as_ref().map_or(true, |e| e.is_constant())
            }
            Expression::NullTest { operand, .. } => operand.is_constant(),
            Expression::IsComparison { left, right, .. } => {
                left.is_constant() && right.is_constant()
            }
            Expression::Between {
                subject, low, high, ..
            } => subject.is_constant() && low.is_constant() && high.is_constant(),
        }
    }
}

impl From<Literal> for Expression {
    fn from(literal: Literal) -> Self {
        Expression::Literal(literal)
    }
}

impl From<ColumnAddress> for Expression {
    fn from(address: ColumnAddress) -> Self {
        Expression::ColumnRef(address)
    }
}

impl fmt::Display for Expression {
    /// Renders SQL text that parses back to the same tree
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(lit) => write!(f, "{}", lit),
            Expression::ColumnRef(addr) => write!(f, "{}", addr),
            Expression::Unary { op, operand } => match op {
                UnaryOperator::Not => write!(f, "NOT {}", operand),
                _ => {
                    let operand = operand.to_string();
                    // "--" would lex as a comment
                    if operand.starts_with('-') {
                        write!(f, "{} {}", op, operand)
                    } else {
                        write!(f, "{}{}", op, operand)
                    }
                }
            },
            Expression::Binary { op, left, right } => write!(f, "{} {} {}", left, op, right),
            Expression::Group(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
            Expression::PatternMatch {
                negated,
                kind,
                left,
                right,
                escape,
            } => {
                write!(f, "{} ", left)?;
                if *negated {
                    write!(f, "NOT ")?;
                }
                write!(f, "{} {}", kind.as_str(), right)?;
                if let Some(escape) = escape {
                    write!(f, " ESCAPE {}", escape)?;
                }
                Ok(())
            }
            Expression::NullTest { operand, negated } => {
                if *negated {
                    write!(f, "{} NOTNULL", operand)
                } else {
                    write!(f, "{} ISNULL", operand)
                }
            }
            Expression::IsComparison {
                left,
                right,
                negated,
                distinct,
            } => {
                write!(f, "{} IS ", left)?;
                if *negated {
                    write!(f, "NOT ")?;
                }
                if *distinct {
                    write!(f, "DISTINCT FROM ")?;
                }
                write!(f, "{}", right)
            }
            Expression::Between {
                subject,
                negated,
                low,
                high,
            } => {
                write!(f, "{} ", subject)?;
                if *negated {
                    write!(f, "NOT ")?;
                }
                write!(f, "BETWEEN {} AND {}", low, high)
            }
        }
    }
}
