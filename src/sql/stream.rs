//! Token cursor shared by every sub-parser.
//!
//! Parsers consume a prefix of the stream and leave the rest for their
//! caller. The cursor is `Copy`, so a speculative parse is simply a parse
//! run on a copy that is thrown away if it fails.

use super::error::{ParseError, ParseResult};
use super::token::{Token, TokenKind};

static EOF: Token = Token {
    kind: TokenKind::Eof,
    text: String::new(),
};

#[derive(Debug, Clone, Copy)]
pub struct TokenStream<'a> {
    tokens: &'a [Token],
    position: usize,
}

impl<'a> TokenStream<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// The next unconsumed token (EOF once the slice is exhausted)
    pub fn peek(&self) -> &'a Token {
        self.peek_nth(0)
    }

    /// Look `n` tokens past the next one
    pub fn peek_nth(&self, n: usize) -> &'a Token {
        self.tokens.get(self.position + n).unwrap_or(&EOF)
    }

    pub fn next_is_kind(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub fn next_is(&self, kind: TokenKind, text: &str) -> bool {
        self.peek().is(kind, text)
    }

    pub fn next_is_keyword(&self, keyword: &str) -> bool {
        self.peek().is_keyword(keyword)
    }

    pub fn is_at_end(&self) -> bool {
        self.next_is_kind(TokenKind::Eof)
    }

    /// Take the next token unconditionally
    pub fn advance(&mut self) -> &'a Token {
        let token = self.peek();
        if self.position < self.tokens.len() {
            self.position += 1;
        }
        token
    }

    /// Take the next token if it is of the given kind
    pub fn consume(&mut self, kind: TokenKind) -> ParseResult<&'a Token> {
        if self.next_is_kind(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::unexpected(kind.as_str(), self.peek()))
        }
    }

    /// Take the next token if both its kind and text match
    pub fn consume_value(&mut self, kind: TokenKind, text: &str) -> ParseResult<&'a Token> {
        if self.next_is(kind, text) {
            Ok(self.advance())
        } else {
            Err(ParseError::unexpected(format!("{} '{}'", kind, text), self.peek()))
        }
    }

    pub fn consume_keyword(&mut self, keyword: &str) -> ParseResult<&'a Token> {
        self.consume_value(TokenKind::Keyword, keyword)
    }

    /// Consume the keyword if present, reporting whether it was
    pub fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.next_is_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Tokens not yet consumed
    pub fn remaining(&self) -> &'a [Token] {
        &self.tokens[self.position.min(self.tokens.len())..]
    }

    pub fn position(&self) -> usize {
        self.position
    }
}
