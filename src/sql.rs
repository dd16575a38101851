// SQL module - tokenizing, expression and statement parsing

pub mod ast;
pub mod error;
pub mod expression;
pub mod lexer;
pub mod literal;
pub mod parser;
pub mod stream;
pub mod token;

pub use ast::*;
pub use error::{ParseError, ParseResult};
pub use expression::{parse_expression, parse_expression_tokens};
pub use lexer::{tokenize, Lexer};
pub use parser::Parser;
pub use stream::TokenStream;
pub use token::{Token, TokenKind};

/// Tokenize and parse a script of `;`-separated statements
pub fn parse_sql(sql: &str) -> ParseResult<Vec<Statement>> {
    let tokens = tokenize(sql);
    Parser::new(&tokens).parse_statements()
}
