//! Operator definitions for expressions.

use std::fmt;

/// Binary operators supported in expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // String / bytes
    Concat,

    // Bitwise over equal-length byte sequences
    BitAnd,
    BitOr,

    // Comparison (`=`/`==` and `<>`/`!=` are synonyms)
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,

    // Logical
    And,
    Or,
}

impl BinaryOperator {
    /// Map an operator token's text to an operator
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "+" => BinaryOperator::Add,
            "-" => BinaryOperator::Sub,
            "*" => BinaryOperator::Mul,
            "/" => BinaryOperator::Div,
            "%" => BinaryOperator::Mod,
            "||" => BinaryOperator::Concat,
            "&" => BinaryOperator::BitAnd,
            "|" => BinaryOperator::BitOr,
            "=" | "==" => BinaryOperator::Eq,
            "<>" | "!=" => BinaryOperator::Ne,
            "<" => BinaryOperator::Lt,
            "<=" => BinaryOperator::Le,
            ">" => BinaryOperator::Gt,
            ">=" => BinaryOperator::Ge,
            "AND" => BinaryOperator::And,
            "OR" => BinaryOperator::Or,
            _ => return None,
        };
        Some(op)
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOperator::Eq
                | BinaryOperator::Ne
                | BinaryOperator::Lt
                | BinaryOperator::Le
                | BinaryOperator::Gt
                | BinaryOperator::Ge
        )
    }

    /// Get the display string for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Mod => "%",
            BinaryOperator::Concat => "||",
            BinaryOperator::BitAnd => "&",
            BinaryOperator::BitOr => "|",
            BinaryOperator::Eq => "=",
            BinaryOperator::Ne => "!=",
            BinaryOperator::Lt => "<",
            BinaryOperator::Le => "<=",
            BinaryOperator::Gt => ">",
            BinaryOperator::Ge => ">=",
            BinaryOperator::And => "AND",
            BinaryOperator::Or => "OR",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unary prefix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Plus,
    Minus,
    BitNot,
    Not,
}

impl UnaryOperator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(UnaryOperator::Plus),
            "-" => Some(UnaryOperator::Minus),
            "~" => Some(UnaryOperator::BitNot),
            "NOT" => Some(UnaryOperator::Not),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOperator::Plus => "+",
            UnaryOperator::Minus => "-",
            UnaryOperator::BitNot => "~",
            UnaryOperator::Not => "NOT",
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pattern-matching operator family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Like,
    Glob,
    Regexp,
    Match,
}

impl PatternKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "LIKE" => Some(PatternKind::Like),
            "GLOB" => Some(PatternKind::Glob),
            "REGEXP" => Some(PatternKind::Regexp),
            "MATCH" => Some(PatternKind::Match),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::Like => "LIKE",
            PatternKind::Glob => "GLOB",
            PatternKind::Regexp => "REGEXP",
            PatternKind::Match => "MATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synonyms() {
        assert_eq!(BinaryOperator::from_symbol("=="), Some(BinaryOperator::Eq));
        assert_eq!(BinaryOperator::from_symbol("="), Some(BinaryOperator::Eq));
        assert_eq!(BinaryOperator::from_symbol("<>"), Some(BinaryOperator::Ne));
        assert_eq!(BinaryOperator::from_symbol("!="), Some(BinaryOperator::Ne));
    }

    #[test]
    fn test_unknown_symbols() {
        assert_eq!(BinaryOperator::from_symbol(">>"), None);
        assert_eq!(BinaryOperator::from_symbol("~"), None);
        assert_eq!(UnaryOperator::from_symbol("*"), None);
        assert_eq!(PatternKind::from_keyword("ILIKE"), None);
    }

    #[test]
    fn test_round_trip_symbols() {
        for op in [
            BinaryOperator::Add,
            BinaryOperator::Concat,
            BinaryOperator::BitOr,
            BinaryOperator::Le,
            BinaryOperator::Or,
        ] {
            assert_eq!(BinaryOperator::from_symbol(op.as_str()), Some(op));
        }
        assert!(BinaryOperator::Ge.is_comparison());
        assert!(!BinaryOperator::And.is_comparison());
    }
}
