//! Recursive-descent expression parser.
//!
//! The parser consumes a prefix of the token stream and leaves the rest to
//! its caller, so statement parsers embed it directly. Right operands are
//! parsed by re-entering the full parser, which makes binary chains
//! right-associative: `a AND b OR c` is `a AND (b OR c)`.

use super::error::{ParseError, ParseResult};
use super::literal::parse_literal;
use super::stream::TokenStream;
use super::token::{Token, TokenKind};
use crate::expression::{BinaryOperator, ColumnAddress, Expression, PatternKind, UnaryOperator};

/// Parse an expression from a token slice, returning the unconsumed tail
pub fn parse_expression_tokens(tokens: &[Token]) -> ParseResult<(Expression, &[Token])> {
    let mut stream = TokenStream::new(tokens);
    let expr = parse_expression(&mut stream)?;
    Ok((expr, stream.remaining()))
}

/// Parse one expression at the cursor
pub fn parse_expression(stream: &mut TokenStream<'_>) -> ParseResult<Expression> {
    if let Some(op) = unary_operator(stream.peek()) {
        stream.advance();
        let operand = parse_expression(stream)?;
        return Ok(Expression::unary(op, operand));
    }

    let primary = parse_primary(stream)?;
    parse_suffix(stream, primary)
}

/// Parse `( expr [, expr]* )`
pub fn parse_group(stream: &mut TokenStream<'_>) -> ParseResult<Expression> {
    stream.consume(TokenKind::LeftParen)?;
    let mut items = vec![parse_expression(stream)?];
    while stream.next_is_kind(TokenKind::Comma) {
        stream.advance();
        items.push(parse_expression(stream)?);
    }
    stream.consume(TokenKind::RightParen)?;
    Ok(Expression::group(items))
}

/// Parse `[[schema.]table.]column`
pub fn parse_column_address(stream: &mut TokenStream<'_>) -> ParseResult<ColumnAddress> {
    if stream.next_is_kind(TokenKind::Dot) {
        return Err(malformed("leading dot", stream.peek()));
    }

    let mut parts = vec![stream.consume(TokenKind::Identifier)?.text.clone()];
    while stream.next_is_kind(TokenKind::Dot) {
        stream.advance();
        let token = stream.peek();
        match token.kind {
            TokenKind::Identifier => {
                parts.push(token.text.clone());
                stream.advance();
            }
            TokenKind::Dot => return Err(malformed("consecutive dots", token)),
            _ => return Err(malformed("trailing dot", token)),
        }
        if parts.len() > 3 {
            return Err(malformed("more than three segments", token));
        }
    }

    let address = match parts.as_slice() {
        [column] => ColumnAddress::new(column.as_str()),
        [table, column] => ColumnAddress::with_table(table.as_str(), column.as_str()),
        [schema, table, column] => {
            ColumnAddress::with_schema(schema.as_str(), table.as_str(), column.as_str())
        }
        _ => return Err(malformed("more than three segments", stream.peek())),
    };
    Ok(address)
}

fn malformed(reason: &str, found: &Token) -> ParseError {
    ParseError::MalformedColumnAddress {
        reason: reason.to_string(),
        found: found.clone(),
    }
}

fn unary_operator(token: &Token) -> Option<UnaryOperator> {
    match token.kind {
        TokenKind::Operator => match token.text.as_str() {
            "+" | "-" | "~" => UnaryOperator::from_symbol(&token.text),
            _ => None,
        },
        TokenKind::Keyword if token.text == "NOT" => Some(UnaryOperator::Not),
        _ => None,
    }
}

fn binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token.kind {
        TokenKind::Operator | TokenKind::Comparison => BinaryOperator::from_symbol(&token.text),
        TokenKind::Keyword if token.text == "AND" || token.text == "OR" => {
            BinaryOperator::from_symbol(&token.text)
        }
        _ => None,
    }
}

/// Group, literal or column address
fn parse_primary(stream: &mut TokenStream<'_>) -> ParseResult<Expression> {
    if stream.next_is_kind(TokenKind::LeftParen) {
        return parse_group(stream);
    }

    let mut attempt = *stream;
    match parse_literal(&mut attempt) {
        Ok(literal) => {
            *stream = attempt;
            return Ok(Expression::Literal(literal));
        }
        // Recognised as a literal but malformed
        Err(
            err @ (ParseError::InvalidBlob { .. }
            | ParseError::InvalidNumber { .. }
            | ParseError::MismatchedQuotes { .. }),
        ) => return Err(err),
        Err(_) => {}
    }

    let mut attempt = *stream;
    match parse_column_address(&mut attempt) {
        Ok(address) => {
            *stream = attempt;
            Ok(Expression::ColumnRef(address))
        }
        Err(err @ ParseError::MalformedColumnAddress { .. }) => Err(err),
        Err(_) => Err(ParseError::NoExpressionRoute {
            found: stream.peek().clone(),
        }),
    }
}

/// Try each suffix construct in priority order; first match wins
fn parse_suffix(stream: &mut TokenStream<'_>, left: Expression) -> ParseResult<Expression> {
    if let Some(negated) = eat_null_test(stream) {
        let test = Expression::null_test(left, negated);
        return parse_binary_tail(stream, test);
    }

    if let Some((negated, kind)) = eat_pattern_operator(stream) {
        let right = parse_expression(stream)?;
        let escape = if stream.eat_keyword("ESCAPE") {
            Some(Box::new(parse_expression(stream)?))
        } else {
            None
        };
        return Ok(Expression::PatternMatch {
            negated,
            kind,
            left: Box::new(left),
            right: Box::new(right),
            escape,
        });
    }

    if stream.eat_keyword("IS") {
        let negated = stream.eat_keyword("NOT");
        let distinct = if stream.eat_keyword("DISTINCT") {
            stream.consume_keyword("FROM")?;
            true
        } else {
            false
        };
        let right = parse_expression(stream)?;
        return Ok(Expression::IsComparison {
            left: Box::new(left),
            right: Box::new(right),
            negated,
            distinct,
        });
    }

    if let Some(negated) = eat_between(stream) {
        let bounds = parse_expression(stream)?;
        return match split_bounds(bounds) {
            Some((low, high)) => Ok(Expression::between(left, low, high, negated)),
            None => Err(ParseError::BetweenMissingAnd {
                found: stream.peek().clone(),
            }),
        };
    }

    parse_binary_tail(stream, left)
}

/// Split a parsed `low AND high` into its bounds.
///
/// A leading unary operator swallows the whole `AND` chain (`-1 AND 1` is
/// `-(1 AND 1)`), so it is pushed back onto the low bound.
fn split_bounds(bounds: Expression) -> Option<(Expression, Expression)> {
    match bounds {
        Expression::Binary {
            op: BinaryOperator::And,
            left,
            right,
        } => Some((*left, *right)),
        Expression::Unary { op, operand } => {
            split_bounds(*operand).map(|(low, high)| (Expression::unary(op, low), high))
        }
        _ => None,
    }
}

/// `left <op> expr` if a binary operator follows, otherwise `left`
fn parse_binary_tail(stream: &mut TokenStream<'_>, left: Expression) -> ParseResult<Expression> {
    match binary_operator(stream.peek()) {
        Some(op) => {
            stream.advance();
            let right = parse_expression(stream)?;
            Ok(Expression::binary(op, left, right))
        }
        None => Ok(left),
    }
}

/// `ISNULL`, `NOTNULL`, `NOT NULL`, `IS NULL`, `IS NOT NULL`; returns `negated`
fn eat_null_test(stream: &mut TokenStream<'_>) -> Option<bool> {
    let keyword = |n: usize, kw: &str| stream.peek_nth(n).is_keyword(kw);

    let (negated, width) = if keyword(0, "ISNULL") {
        (false, 1)
    } else if keyword(0, "NOTNULL") {
        (true, 1)
    } else if keyword(0, "NOT") && keyword(1, "NULL") {
        (true, 2)
    } else if keyword(0, "IS") && keyword(1, "NULL") {
        (false, 2)
    } else if keyword(0, "IS") && keyword(1, "NOT") && keyword(2, "NULL") {
        (true, 3)
    } else {
        return None;
    };

    for _ in 0..width {
        stream.advance();
    }
    Some(negated)
}

fn pattern_at(stream: &TokenStream<'_>, n: usize) -> Option<PatternKind> {
    let token = stream.peek_nth(n);
    if token.kind == TokenKind::Keyword {
        PatternKind::from_keyword(&token.text)
    } else {
        None
    }
}

fn eat_pattern_operator(stream: &mut TokenStream<'_>) -> Option<(bool, PatternKind)> {
    if let Some(kind) = pattern_at(stream, 0) {
        stream.advance();
        return Some((false, kind));
    }
    if stream.next_is_keyword("NOT") {
        if let Some(kind) = pattern_at(stream, 1) {
            stream.advance();
            stream.advance();
            return Some((true, kind));
        }
    }
    None
}

fn eat_between(stream: &mut TokenStream<'_>) -> Option<bool> {
    if stream.eat_keyword("BETWEEN") {
        return Some(false);
    }
    if stream.next_is_keyword("NOT") && stream.peek_nth(1).is_keyword("BETWEEN") {
        stream.advance();
        stream.advance();
        return Some(true);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::Value;
    use crate::sql::lexer::tokenize;

    /// Parse a whole input as one expression
    fn parse(sql: &str) -> ParseResult<Expression> {
        let tokens = tokenize(sql);
        let mut stream = TokenStream::new(&tokens);
        let expr = parse_expression(&mut stream)?;
        stream.consume(TokenKind::Eof)?;
        Ok(expr)
    }

    fn int(i: i64) -> Expression {
        Expression::literal(Value::Integer(i))
    }

    fn boolean(b: bool) -> Expression {
        Expression::literal(Value::Boolean(b))
    }

    #[test]
    fn test_leaves() {
        assert_eq!(parse("8153").unwrap(), int(8153));
        assert_eq!(parse("'abc'").unwrap(), Expression::literal(Value::Text("abc".into())));
        assert_eq!(parse("col").unwrap(), Expression::column("col"));
        assert_eq!(parse("NULL").unwrap(), Expression::literal(Value::Null));
    }

    #[test]
    fn test_unary() {
        assert_eq!(
            parse("+8153").unwrap(),
            Expression::unary(UnaryOperator::Plus, int(8153))
        );
        assert_eq!(
            parse("(-150)").unwrap(),
            Expression::group(vec![Expression::unary(UnaryOperator::Minus, int(150))])
        );
        assert_eq!(
            parse("~x'0f'").unwrap(),
            Expression::unary(
                UnaryOperator::BitNot,
                Expression::literal(Value::Bytes(vec![0x0f]))
            )
        );
    }

    #[test]
    fn test_column_addresses() {
        assert_eq!(
            parse("a.b.c").unwrap(),
            Expression::ColumnRef(ColumnAddress::with_schema("a", "b", "c"))
        );
        assert_eq!(
            parse("t.c").unwrap(),
            Expression::ColumnRef(ColumnAddress::with_table("t", "c"))
        );

        for bad in [
            "a..b",
            ".a.b",
            "a.b.c.d",
            "schema..column",
            ".table.column",
            "schema.table.",
            "..column",
        ] {
            assert!(
                matches!(parse(bad), Err(ParseError::MalformedColumnAddress { .. })),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_rejected_inputs() {
        for bad in [
            "3>>2",
            "3>>>2",
            "3><2",
            "TRUE AND",
            "AND FALSE",
            "= 5",
            "(1+ )",
            "+",
            "NOT",
            "(1 + 2",
            "NOT (TRUE AND FALSE) OR (TRUE",
            "(1, 2, 3, 4 5, 6 )",
            "TRUE AND OR",
        ] {
            assert!(parse(bad).is_err(), "{} should be rejected", bad);
        }
    }

    #[test]
    fn test_right_associativity() {
        let expr = parse("NOT (TRUE AND FALSE) OR (3 = 1+2)").unwrap();
        let expected = Expression::unary(
            UnaryOperator::Not,
            Expression::binary(
                BinaryOperator::Or,
                Expression::group(vec![Expression::binary(
                    BinaryOperator::And,
                    boolean(true),
                    boolean(false),
                )]),
                Expression::group(vec![Expression::binary(
                    BinaryOperator::Eq,
                    int(3),
                    Expression::binary(BinaryOperator::Add, int(1), int(2)),
                )]),
            ),
        );
        assert_eq!(expr, expected);

        let expr = parse("a AND b OR c").unwrap();
        assert_eq!(
            expr,
            Expression::binary(
                BinaryOperator::And,
                Expression::column("a"),
                Expression::binary(
                    BinaryOperator::Or,
                    Expression::column("b"),
                    Expression::column("c")
                )
            )
        );
    }

    #[test]
    fn test_groups() {
        assert_eq!(
            parse("(1, 2, 3)").unwrap(),
            Expression::group(vec![int(1), int(2), int(3)])
        );
        assert!(parse("()").is_err());

        let wrapped = parse("((col_name))").unwrap();
        assert_eq!(wrapped.unwrap_group(), &parse("col_name").unwrap());
    }

    #[test]
    fn test_null_tests() {
        let isnull = Expression::null_test(Expression::column("a"), false);
        let notnull = Expression::null_test(Expression::column("a"), true);
        assert_eq!(parse("a ISNULL").unwrap(), isnull);
        assert_eq!(parse("a IS NULL").unwrap(), isnull);
        assert_eq!(parse("a NOTNULL").unwrap(), notnull);
        assert_eq!(parse("a NOT NULL").unwrap(), notnull);
        assert_eq!(parse("a IS NOT NULL").unwrap(), notnull);

        assert_eq!(
            parse("a ISNULL AND b").unwrap(),
            Expression::binary(BinaryOperator::And, isnull, Expression::column("b"))
        );
    }

    #[test]
    fn test_is_comparisons() {
        let is = |negated, distinct| Expression::IsComparison {
            left: Box::new(Expression::column("a")),
            right: Box::new(int(1)),
            negated,
            distinct,
        };
        assert_eq!(parse("a IS 1").unwrap(), is(false, false));
        assert_eq!(parse("a IS NOT 1").unwrap(), is(true, false));
        assert_eq!(parse("a IS DISTINCT FROM 1").unwrap(), is(false, true));
        assert_eq!(parse("a IS NOT DISTINCT FROM 1").unwrap(), is(true, true));
        assert!(parse("a IS DISTINCT 1").is_err());
    }

    #[test]
    fn test_pattern_match() {
        let expr = parse("name NOT LIKE 'a%' ESCAPE '!'").unwrap();
        assert_eq!(
            expr,
            Expression::PatternMatch {
                negated: true,
                kind: PatternKind::Like,
                left: Box::new(Expression::column("name")),
                right: Box::new(Expression::literal(Value::Text("a%".into()))),
                escape: Some(Box::new(Expression::literal(Value::Text("!".into())))),
            }
        );

        // The right side is a full expression
        let expr = parse("a GLOB b AND c").unwrap();
        match expr {
            Expression::PatternMatch { kind, right, .. } => {
                assert_eq!(kind, PatternKind::Glob);
                assert!(matches!(
                    *right,
                    Expression::Binary {
                        op: BinaryOperator::And,
                        ..
                    }
                ));
            }
            other => panic!("expected pattern match, got {:?}", other),
        }
    }

    #[test]
    fn test_between() {
        assert_eq!(
            parse("col BETWEEN 0 AND 10").unwrap(),
            Expression::between(Expression::column("col"), int(0), int(10), false)
        );
        assert_eq!(
            parse("col NOT BETWEEN -1 AND 1").unwrap(),
            Expression::between(
                Expression::column("col"),
                Expression::unary(UnaryOperator::Minus, int(1)),
                int(1),
                true
            )
        );
        assert!(matches!(
            parse("col BETWEEN 0 OR 10"),
            Err(ParseError::BetweenMissingAnd { .. })
        ));
    }

    #[test]
    fn test_leaves_remaining_tokens() {
        let tokens = tokenize("a + 1 FROM t");
        let (expr, rest) = parse_expression_tokens(&tokens).unwrap();
        assert_eq!(
            expr,
            Expression::binary(BinaryOperator::Add, Expression::column("a"), int(1))
        );
        assert!(rest[0].is_keyword("FROM"));
        assert_eq!(rest.len(), 3);
    }

    #[test]
    fn test_synonym_comparisons() {
        assert_eq!(parse("a == 1").unwrap(), parse("a = 1").unwrap());
        assert_eq!(parse("a <> 1").unwrap(), parse("a != 1").unwrap());
    }

    #[test]
    fn test_display_parses_back() {
        for sql in [
            "NOT (TRUE AND flag)",
            "a + b * 2",
            "x NOT BETWEEN 0 AND 10",
            "s.t.c ISNULL",
            "a IS NOT DISTINCT FROM 'x'",
            "- -5",
        ] {
            let expr = parse(sql).unwrap();
            assert_eq!(parse(&expr.to_string()).unwrap(), expr, "{}", sql);
        }
    }
}
