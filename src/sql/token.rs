// SQL tokens for lexical analysis

use std::fmt;

/// Classification of a token produced by the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Identifier,
    StringLiteral,
    NumberLiteral,
    Operator,
    Comparison,
    Comma,
    Semicolon,
    Dot,
    LeftParen,
    RightParen,
    Eof,
    Unknown,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::StringLiteral => "STRING_LITERAL",
            TokenKind::NumberLiteral => "NUMBER_LITERAL",
            TokenKind::Operator => "OPERATOR",
            TokenKind::Comparison => "COMPARISON",
            TokenKind::Comma => "COMMA",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Dot => "DOT",
            TokenKind::LeftParen => "LPAREN",
            TokenKind::RightParen => "RPAREN",
            TokenKind::Eof => "EOF",
            TokenKind::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified piece of SQL text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn eof() -> Self {
        Self::new(TokenKind::Eof, "")
    }

    pub fn keyword(text: &str) -> Self {
        Self::new(TokenKind::Keyword, text.to_uppercase())
    }

    pub fn identifier(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Identifier, text)
    }

    /// Check both kind and text
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.is(TokenKind::Keyword, keyword)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind == TokenKind::Eof {
            write!(f, "end of input")
        } else {
            write!(f, "{} '{}'", self.kind, self.text)
        }
    }
}

const KEYWORDS: &[&str] = &[
    "SELECT", "FROM", "WHERE", "INSERT", "UPDATE", "DELETE", "CREATE", "DROP", "ALTER", "TABLE",
    "INDEX", "VIEW", "DATABASE", "SCHEMA", "INTO", "VALUES", "SET", "AND", "OR", "NOT", "NULL",
    "IS", "IN", "LIKE", "BETWEEN", "EXISTS", "DISTINCT", "ALL", "ANY", "SOME", "UNION",
    "INTERSECT", "EXCEPT", "ORDER", "BY", "GROUP", "HAVING", "LIMIT", "OFFSET", "JOIN", "INNER",
    "LEFT", "RIGHT", "FULL", "OUTER", "CROSS", "ON", "USING", "AS", "CASE", "WHEN", "THEN",
    "ELSE", "END", "IF", "BEGIN", "COMMIT", "ROLLBACK", "TRANSACTION", "PRIMARY", "KEY",
    "FOREIGN", "REFERENCES", "UNIQUE", "CHECK", "DEFAULT", "CONSTRAINT", "INT", "INTEGER",
    "BIGINT", "SMALLINT", "VARCHAR", "CHAR", "TEXT", "BLOB", "BOOLEAN", "BOOL", "DECIMAL",
    "NUMERIC", "FLOAT", "DOUBLE", "REAL", "ASC", "DESC", "TRUE", "FALSE", "ISNULL", "NOTNULL",
    "ESCAPE", "GLOB", "REGEXP", "MATCH",
];

/// Check whether a word is reserved (case-insensitive)
pub fn is_keyword(word: &str) -> bool {
    let upper = word.to_uppercase();
    KEYWORDS.contains(&upper.as_str())
}
