//! Parse error types.

use super::token::Token;
use thiserror::Error;

/// Errors raised by the literal, expression and statement parsers.
///
/// Every variant carries the construct that was expected and the token the
/// parser found instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: Token },

    #[error("unable to find parsing route for expression at {found}")]
    NoExpressionRoute { found: Token },

    #[error("malformed column address: {reason} at {found}")]
    MalformedColumnAddress { reason: String, found: Token },

    #[error("mismatched quotes in literal {found}")]
    MismatchedQuotes { found: Token },

    #[error("invalid blob literal {found}: {reason}")]
    InvalidBlob { reason: String, found: Token },

    #[error("invalid numeric literal {found}")]
    InvalidNumber { found: Token },

    #[error("BETWEEN expression missing AND operator near {found}")]
    BetweenMissingAnd { found: Token },
}

impl ParseError {
    pub fn unexpected(expected: impl Into<String>, found: &Token) -> Self {
        ParseError::UnexpectedToken {
            expected: expected.into(),
            found: found.clone(),
        }
    }

    /// The token at which parsing failed
    pub fn found(&self) -> &Token {
        match self {
            ParseError::UnexpectedToken { found, .. }
            | ParseError::NoExpressionRoute { found }
            | ParseError::MalformedColumnAddress { found, .. }
            | ParseError::MismatchedQuotes { found }
            | ParseError::InvalidBlob { found, .. }
            | ParseError::InvalidNumber { found }
            | ParseError::BetweenMissingAnd { found } => found,
        }
    }
}

/// Result type for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::token::TokenKind;

    #[test]
    fn test_error_display() {
        let err = ParseError::unexpected("RPAREN", &Token::eof());
        assert_eq!(err.to_string(), "expected RPAREN, found end of input");

        let err = ParseError::NoExpressionRoute {
            found: Token::new(TokenKind::Dot, "."),
        };
        assert_eq!(
            err.to_string(),
            "unable to find parsing route for expression at DOT '.'"
        );
        assert_eq!(err.found().kind, TokenKind::Dot);
    }
}
