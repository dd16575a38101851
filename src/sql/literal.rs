//! Literal sub-parsers.
//!
//! Each parser either consumes the tokens of one literal and returns it, or
//! fails without moving the caller's cursor.

use super::error::{ParseError, ParseResult};
use super::stream::TokenStream;
use super::token::{Token, TokenKind};
use crate::expression::Literal;

/// Parse any literal: TRUE/FALSE/NULL, a blob, a string or a signed number
pub fn parse_literal(stream: &mut TokenStream<'_>) -> ParseResult<Literal> {
    let token = stream.peek();
    match token.kind {
        TokenKind::Keyword => parse_keyword_literal(stream),
        TokenKind::Identifier => parse_blob(stream),
        TokenKind::StringLiteral => parse_string(stream),
        TokenKind::NumberLiteral | TokenKind::Operator => parse_signed_number(stream),
        _ => Err(ParseError::unexpected("literal", token)),
    }
}

/// `TRUE`, `FALSE` or `NULL`
pub fn parse_keyword_literal(stream: &mut TokenStream<'_>) -> ParseResult<Literal> {
    let token = stream.peek();
    let literal = match token.text.as_str() {
        "TRUE" if token.kind == TokenKind::Keyword => Literal::bool(true),
        "FALSE" if token.kind == TokenKind::Keyword => Literal::bool(false),
        "NULL" if token.kind == TokenKind::Keyword => Literal::null(),
        _ => return Err(ParseError::unexpected("TRUE, FALSE or NULL", token)),
    };
    stream.advance();
    Ok(literal)
}

/// Optional `+`/`-` sign followed by a number token.
///
/// A `.` in the digits makes the literal a float.
pub fn parse_signed_number(stream: &mut TokenStream<'_>) -> ParseResult<Literal> {
    let mut cursor = *stream;
    let negative = if cursor.next_is(TokenKind::Operator, "-") {
        cursor.advance();
        true
    } else {
        if cursor.next_is(TokenKind::Operator, "+") {
            cursor.advance();
        }
        false
    };

    let token = cursor.consume(TokenKind::NumberLiteral)?;
    // Parse with the sign attached so i64::MIN is representable
    let digits = if negative {
        format!("-{}", token.text)
    } else {
        token.text.clone()
    };
    let literal = if digits.contains('.') {
        digits
            .parse::<f64>()
            .map(Literal::float)
            .map_err(|_| ParseError::InvalidNumber {
                found: token.clone(),
            })?
    } else {
        digits
            .parse::<i64>()
            .map(Literal::integer)
            .map_err(|_| ParseError::InvalidNumber {
                found: token.clone(),
            })?
    };

    *stream = cursor;
    Ok(literal)
}

/// A `'...'` or `"..."` string; a doubled quote inside stands for one quote
pub fn parse_string(stream: &mut TokenStream<'_>) -> ParseResult<Literal> {
    let token = stream.peek();
    if token.kind != TokenKind::StringLiteral {
        return Err(ParseError::unexpected("string literal", token));
    }
    let (quote, body) = strip_quotes(token)?;
    let doubled = format!("{}{}", quote, quote);
    let text = body.replace(&doubled, &quote.to_string());
    stream.advance();
    Ok(Literal::text(text))
}

/// `x'00ff'` or `X"00FF"`
pub fn parse_blob(stream: &mut TokenStream<'_>) -> ParseResult<Literal> {
    let marker = stream.peek();
    if marker.kind != TokenKind::Identifier || !marker.text.eq_ignore_ascii_case("x") {
        return Err(ParseError::unexpected("blob literal", marker));
    }
    let payload = stream.peek_nth(1);
    if payload.kind != TokenKind::StringLiteral {
        return Err(ParseError::unexpected("hex string", payload));
    }

    let (_, hex_digits) = strip_quotes(payload)?;
    if hex_digits.len() % 2 != 0 {
        return Err(ParseError::InvalidBlob {
            reason: "odd number of hex digits".to_string(),
            found: payload.clone(),
        });
    }
    let bytes = hex::decode(hex_digits).map_err(|e| ParseError::InvalidBlob {
        reason: e.to_string(),
        found: payload.clone(),
    })?;

    stream.advance();
    stream.advance();
    Ok(Literal::bytes(bytes))
}

/// Split a quoted token into its quote character and body
fn strip_quotes(token: &Token) -> ParseResult<(char, &str)> {
    let text = token.text.as_str();
    let mut chars = text.chars();
    match (chars.next(), chars.next_back()) {
        (Some(open), Some(close)) if open == close && (open == '\'' || open == '"') => {
            Ok((open, &text[1..text.len() - 1]))
        }
        _ => Err(ParseError::MismatchedQuotes {
            found: token.clone(),
        }),
    }
}
