// SQL lexer - tokenizes SQL statements

use super::token::{is_keyword, Token, TokenKind};

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    current_char: Option<char>,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        let input: Vec<char> = input.chars().collect();
        let current_char = input.first().copied();
        Lexer {
            input,
            position: 0,
            current_char,
        }
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace();
            match (self.current_char, self.peek()) {
                (Some('-'), Some('-')) => self.skip_line_comment(),
                (Some('/'), Some('*')) => self.skip_block_comment(),
                _ => break,
            }
        }

        let ch = match self.current_char {
            Some(ch) => ch,
            None => return Token::eof(),
        };

        match ch {
            '+' | '-' | '*' | '/' | '%' | '~' | '&' => {
                self.advance();
                Token::new(TokenKind::Operator, ch.to_string())
            }
            '|' => {
                self.advance();
                if self.current_char == Some('|') {
                    self.advance();
                    Token::new(TokenKind::Operator, "||")
                } else {
                    Token::new(TokenKind::Operator, "|")
                }
            }
            '=' => {
                self.advance();
                if self.current_char == Some('=') {
                    self.advance();
                    Token::new(TokenKind::Comparison, "==")
                } else {
                    Token::new(TokenKind::Comparison, "=")
                }
            }
            '<' => {
                self.advance();
                match self.current_char {
                    Some('=') => {
                        self.advance();
                        Token::new(TokenKind::Comparison, "<=")
                    }
                    Some('>') => {
                        self.advance();
                        Token::new(TokenKind::Comparison, "<>")
                    }
                    _ => Token::new(TokenKind::Comparison, "<"),
                }
            }
            '>' => {
                self.advance();
                if self.current_char == Some('=') {
                    self.advance();
                    Token::new(TokenKind::Comparison, ">=")
                } else {
                    Token::new(TokenKind::Comparison, ">")
                }
            }
            '!' => {
                self.advance();
                if self.current_char == Some('=') {
                    self.advance();
                    Token::new(TokenKind::Comparison, "!=")
                } else {
                    Token::new(TokenKind::Unknown, "!")
                }
            }
            '(' => {
                self.advance();
                Token::new(TokenKind::LeftParen, "(")
            }
            ')' => {
                self.advance();
                Token::new(TokenKind::RightParen, ")")
            }
            ',' => {
                self.advance();
                Token::new(TokenKind::Comma, ",")
            }
            ';' => {
                self.advance();
                Token::new(TokenKind::Semicolon, ";")
            }
            '.' => {
                self.advance();
                Token::new(TokenKind::Dot, ".")
            }
            '\'' | '"' => self.read_string(ch),
            '`' => self.read_delimited_identifier('`'),
            '[' => self.read_delimited_identifier(']'),
            c if c.is_ascii_alphabetic() || c == '_' => self.read_identifier(),
            c if c.is_ascii_digit() => self.read_number(),
            other => {
                self.advance();
                Token::new(TokenKind::Unknown, other.to_string())
            }
        }
    }

    /// Advance to the next character
    fn advance(&mut self) {
        self.position += 1;
        self.current_char = self.input.get(self.position).copied();
    }

    /// Peek at the next character without advancing
    fn peek(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    /// Skip whitespace characters
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Skip single-line comments starting with --
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.current_char {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip /* block */ comments; an unterminated comment runs to the end
    fn skip_block_comment(&mut self) {
        self.advance();
        self.advance();
        while let Some(ch) = self.current_char {
            if ch == '*' && self.peek() == Some('/') {
                self.advance();
                self.advance();
                return;
            }
            self.advance();
        }
    }

    /// Read an identifier or keyword
    fn read_identifier(&mut self) -> Token {
        let mut identifier = String::new();

        while let Some(ch) = self.current_char {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                identifier.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if is_keyword(&identifier) {
            Token::keyword(&identifier)
        } else {
            Token::identifier(identifier)
        }
    }

    /// Read a `quoted` or [bracketed] identifier, dropping the delimiters
    fn read_delimited_identifier(&mut self, closing: char) -> Token {
        let start = self.position;
        self.advance();
        let mut identifier = String::new();

        while let Some(ch) = self.current_char {
            self.advance();
            if ch == closing {
                return Token::identifier(identifier);
            }
            identifier.push(ch);
        }

        // No closing delimiter: hand the raw text to the parser
        Token::new(
            TokenKind::Unknown,
            self.input[start..].iter().collect::<String>(),
        )
    }

    /// Read a string literal, keeping its quotes in the token text
    fn read_string(&mut self, quote: char) -> Token {
        let mut string = String::new();
        string.push(quote);
        self.advance();

        while let Some(ch) = self.current_char {
            string.push(ch);
            self.advance();
            if ch == '\\' {
                if let Some(escaped) = self.current_char {
                    string.push(escaped);
                    self.advance();
                }
            } else if ch == quote {
                if self.current_char == Some(quote) {
                    // Doubled quote stays inside the literal
                    string.push(quote);
                    self.advance();
                } else {
                    return Token::new(TokenKind::StringLiteral, string);
                }
            }
        }

        Token::new(TokenKind::Unknown, string)
    }

    /// Read a number (integer or float)
    fn read_number(&mut self) -> Token {
        let mut number = String::new();
        let mut has_dot = false;

        while let Some(ch) = self.current_char {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::new(TokenKind::NumberLiteral, number)
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }

        tokens
    }
}

/// Tokenize a SQL string in one call
pub fn tokenize(sql: &str) -> Vec<Token> {
    Lexer::new(sql).tokenize()
}
