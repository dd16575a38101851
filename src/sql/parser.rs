// SQL parser - converts tokens to statement ASTs

use super::ast::*;
use super::error::{ParseError, ParseResult};
use super::expression::{parse_expression, parse_group};
use super::literal::{parse_literal, parse_signed_number};
use super::stream::TokenStream;
use super::token::{Token, TokenKind};
use crate::access::DataType;
use crate::expression::Expression;

pub struct Parser<'a> {
    stream: TokenStream<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Parser {
            stream: TokenStream::new(tokens),
        }
    }

    /// Parse every `;`-separated statement up to end of input
    pub fn parse_statements(&mut self) -> ParseResult<Vec<Statement>> {
        let mut statements = vec![];
        while let Some(statement) = self.next_statement() {
            statements.push(statement?);
        }
        Ok(statements)
    }

    /// Parse the next statement, skipping empty ones; `None` at end of input
    pub fn next_statement(&mut self) -> Option<ParseResult<Statement>> {
        while self.stream.next_is_kind(TokenKind::Semicolon) {
            self.stream.advance();
        }
        if self.stream.is_at_end() {
            return None;
        }
        Some(self.parse_statement())
    }

    /// Parse one statement and its terminating `;` (or end of input)
    pub fn parse_statement(&mut self) -> ParseResult<Statement> {
        let token = self.stream.peek();
        let statement = match token.text.as_str() {
            "CREATE" if token.kind == TokenKind::Keyword => self.parse_create_table()?,
            "DROP" if token.kind == TokenKind::Keyword => self.parse_drop_table()?,
            "INSERT" if token.kind == TokenKind::Keyword => self.parse_insert()?,
            "SELECT" if token.kind == TokenKind::Keyword => self.parse_select()?,
            "UPDATE" if token.kind == TokenKind::Keyword => self.parse_update()?,
            "DELETE" if token.kind == TokenKind::Keyword => self.parse_delete()?,
            _ => return Err(ParseError::unexpected("SQL statement", token)),
        };

        if !self.stream.is_at_end() {
            self.stream.consume(TokenKind::Semicolon)?;
        }
        Ok(statement)
    }

    /// Parse CREATE TABLE statement
    fn parse_create_table(&mut self) -> ParseResult<Statement> {
        self.stream.consume_keyword("CREATE")?;
        self.stream.consume_keyword("TABLE")?;

        let if_not_exists = if self.stream.eat_keyword("IF") {
            self.stream.consume_keyword("NOT")?;
            self.stream.consume_keyword("EXISTS")?;
            true
        } else {
            false
        };

        let table = self.parse_table_name()?;

        self.stream.consume(TokenKind::LeftParen)?;
        let mut columns = vec![self.parse_column_definition()?];
        while self.stream.next_is_kind(TokenKind::Comma) {
            self.stream.advance();
            columns.push(self.parse_column_definition()?);
        }
        self.stream.consume(TokenKind::RightParen)?;

        Ok(Statement::CreateTable(CreateTableStatement {
            table,
            if_not_exists,
            columns,
        }))
    }

    /// Parse column definition
    fn parse_column_definition(&mut self) -> ParseResult<ColumnDefinition> {
        let name = self.expect_identifier()?;
        let data_type = self.parse_data_type()?;

        let mut nullable = true;
        let mut default = None;
        let mut constraints = vec![];

        // Parse column constraints
        loop {
            if self.stream.eat_keyword("NOT") {
                self.stream.consume_keyword("NULL")?;
                nullable = false;
                constraints.push(ColumnConstraint::NotNull);
            } else if self.stream.eat_keyword("NULL") {
                nullable = true;
            } else if self.stream.eat_keyword("PRIMARY") {
                self.stream.consume_keyword("KEY")?;
                nullable = false;
                constraints.push(ColumnConstraint::PrimaryKey);
            } else if self.stream.eat_keyword("UNIQUE") {
                constraints.push(ColumnConstraint::Unique);
            } else if self.stream.eat_keyword("DEFAULT") {
                default = Some(parse_literal(&mut self.stream)?);
            } else {
                break;
            }
        }

        Ok(ColumnDefinition {
            name,
            data_type,
            nullable,
            default,
            constraints,
        })
    }

    /// Parse data type, ignoring any length/precision arguments
    /// Type name with optional `(n [, m])` arguments, mapped by affinity
    fn parse_data_type(&mut self) -> ParseResult<DataType> {
        let token = self.stream.peek();
        if !matches!(token.kind, TokenKind::Identifier | TokenKind::Keyword) {
            return Err(ParseError::unexpected("type name", token));
        }
        self.stream.advance();
        let data_type = type_affinity(&token.text);

        if self.stream.next_is_kind(TokenKind::LeftParen) {
            self.stream.advance();
            parse_signed_number(&mut self.stream)?;
            if self.stream.next_is_kind(TokenKind::Comma) {
                self.stream.advance();
                parse_signed_number(&mut self.stream)?;
            }
            self.stream.consume(TokenKind::RightParen)?;
        }

        Ok(data_type)
    }

    /// Parse DROP TABLE statement
    fn parse_drop_table(&mut self) -> ParseResult<Statement> {
        self.stream.consume_keyword("DROP")?;
        self.stream.consume_keyword("TABLE")?;

        let if_exists = if self.stream.eat_keyword("IF") {
            self.stream.consume_keyword("EXISTS")?;
            true
        } else {
            false
        };

        let table = self.parse_table_name()?;

        Ok(Statement::DropTable(DropTableStatement { table, if_exists }))
    }

    /// Parse INSERT statement
    fn parse_insert(&mut self) -> ParseResult<Statement> {
        self.stream.consume_keyword("INSERT")?;
        self.stream.consume_keyword("INTO")?;

        let table = self.parse_table_name()?;

        let columns = if self.stream.next_is_kind(TokenKind::LeftParen) {
            self.stream.advance();
            let cols = self.parse_identifier_list()?;
            self.stream.consume(TokenKind::RightParen)?;
            Some(cols)
        } else {
            None
        };

        self.stream.consume_keyword("VALUES")?;

        let mut values = vec![];
        loop {
            match parse_group(&mut self.stream)? {
                Expression::Group(items) => values.push(items),
                other => values.push(vec![other]),
            }

            if !self.stream.next_is_kind(TokenKind::Comma) {
                break;
            }
            self.stream.advance();
        }

        Ok(Statement::Insert(InsertStatement {
            table,
            columns,
            values,
        }))
    }

    /// Parse SELECT statement
    fn parse_select(&mut self) -> ParseResult<Statement> {
        self.stream.consume_keyword("SELECT")?;

        let projection = if self.stream.next_is(TokenKind::Operator, "*") {
            self.stream.advance();
            Projection::AllColumns
        } else {
            Projection::Columns(self.parse_identifier_list()?)
        };

        self.stream.consume_keyword("FROM")?;
        let from = self.parse_qualified_table_name()?;
        let where_clause = self.parse_where()?;

        Ok(Statement::Select(SelectStatement {
            projection,
            from,
            where_clause,
        }))
    }

    /// Parse UPDATE statement
    fn parse_update(&mut self) -> ParseResult<Statement> {
        self.stream.consume_keyword("UPDATE")?;

        let table = self.parse_qualified_table_name()?;

        self.stream.consume_keyword("SET")?;

        let assignments = self.parse_assignments()?;
        let where_clause = self.parse_where()?;

        Ok(Statement::Update(UpdateStatement {
            table,
            assignments,
            where_clause,
        }))
    }

    /// Parse assignments for UPDATE
    fn parse_assignments(&mut self) -> ParseResult<Vec<Assignment>> {
        let mut assignments = vec![];

        loop {
            let columns = if self.stream.next_is_kind(TokenKind::LeftParen) {
                self.stream.advance();
                let cols = self.parse_identifier_list()?;
                self.stream.consume(TokenKind::RightParen)?;
                cols
            } else {
                vec![self.expect_identifier()?]
            };
            self.stream.consume_value(TokenKind::Comparison, "=")?;
            let value = parse_expression(&mut self.stream)?;

            assignments.push(Assignment { columns, value });

            if !self.stream.next_is_kind(TokenKind::Comma) {
                break;
            }
            self.stream.advance();
        }

        Ok(assignments)
    }

    /// Parse DELETE statement
    fn parse_delete(&mut self) -> ParseResult<Statement> {
        self.stream.consume_keyword("DELETE")?;
        self.stream.consume_keyword("FROM")?;

        let table = self.parse_qualified_table_name()?;
        let where_clause = self.parse_where()?;

        Ok(Statement::Delete(DeleteStatement {
            table,
            where_clause,
        }))
    }

    fn parse_where(&mut self) -> ParseResult<Option<Expression>> {
        if self.stream.eat_keyword("WHERE") {
            Ok(Some(parse_expression(&mut self.stream)?))
        } else {
            Ok(None)
        }
    }

    /// `[schema.]table [[AS] alias]`
    fn parse_qualified_table_name(&mut self) -> ParseResult<TableName> {
        let table = self.parse_table_name()?;
        if self.stream.eat_keyword("AS") || self.stream.next_is_kind(TokenKind::Identifier) {
            return Ok(table.with_alias(self.expect_identifier()?));
        }
        Ok(table)
    }

    /// `[schema.]table`
    fn parse_table_name(&mut self) -> ParseResult<TableName> {
        let first = self.expect_identifier()?;
        if self.stream.next_is_kind(TokenKind::Dot) {
            self.stream.advance();
            let name = self.expect_identifier()?;
            Ok(TableName::qualified(first, name))
        } else {
            Ok(TableName::new(first))
        }
    }

    fn parse_identifier_list(&mut self) -> ParseResult<Vec<String>> {
        let mut identifiers = vec![self.expect_identifier()?];
        while self.stream.next_is_kind(TokenKind::Comma) {
            self.stream.advance();
            identifiers.push(self.expect_identifier()?);
        }
        Ok(identifiers)
    }

    fn expect_identifier(&mut self) -> ParseResult<String> {
        Ok(self.stream.consume(TokenKind::Identifier)?.text.clone())
    }
}

/// Storage type for a declared type name, chosen by the first rule that matches
fn type_affinity(name: &str) -> DataType {
    let name = name.to_ascii_uppercase();
    if name == "BOOL" || name == "BOOLEAN" {
        DataType::Boolean
    } else if name.contains("INT") {
        DataType::Integer
    } else if ["CHAR", "CLOB", "TEXT"].iter().any(|part| name.contains(part)) {
        DataType::Text
    } else if name.contains("BLOB") {
        DataType::Bytes
    } else {
        // REAL, FLOA, DOUB and every unrecognized name
        DataType::Float
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::Value;
    use crate::expression::{BinaryOperator, Literal, UnaryOperator};
    use crate::sql::lexer::tokenize;

    fn parse(sql: &str) -> ParseResult<Statement> {
        let tokens = tokenize(sql);
        Parser::new(&tokens).parse_statement()
    }

    #[test]
    fn test_parse_create_table() {
        let stmt = parse(
            "CREATE TABLE IF NOT EXISTS app.items (
                id INTEGER PRIMARY KEY,
                name VARCHAR(32) NOT NULL,
                price DECIMAL(10, 2) DEFAULT -1.5,
                tag TEXT UNIQUE NULL,
                data BLOB DEFAULT x'00'
            )",
        )
        .unwrap();

        match stmt {
            Statement::CreateTable(create) => {
                assert_eq!(create.table, TableName::qualified("app", "items"));
                assert!(create.if_not_exists);
                assert_eq!(create.columns.len(), 5);

                assert!(!create.columns[0].nullable);
                assert!(create.columns[0].is_unique());
                assert_eq!(create.columns[1].data_type, DataType::Text);
                assert!(!create.columns[1].nullable);
                assert_eq!(create.columns[2].data_type, DataType::Float);
                assert_eq!(create.columns[2].default, Some(Literal::float(-1.5)));
                assert!(create.columns[3].nullable);
                assert!(create.columns[3].is_unique());
                assert_eq!(create.columns[4].default, Some(Literal::bytes(vec![0])));
            }
            _ => panic!("Expected CREATE TABLE statement"),
        }
    }

    #[test]
    fn test_parse_type_affinity() {
        let stmt = parse(
            "CREATE TABLE t (
                a TINYINT, b NVARCHAR(10), c CLOB, d DATETIME,
                e DECIMAL(10, -2), f DOUBLE, g bool, h MEDIUMBLOB
            )",
        )
        .unwrap();

        let Statement::CreateTable(create) = stmt else {
            panic!("Expected CREATE TABLE statement");
        };
        let types: Vec<DataType> = create.columns.iter().map(|c| c.data_type).collect();
        assert_eq!(
            types,
            vec![
                DataType::Integer,
                DataType::Text,
                DataType::Text,
                DataType::Float,
                DataType::Float,
                DataType::Float,
                DataType::Boolean,
                DataType::Bytes,
            ]
        );
    }

    #[test]
    fn test_parse_create_table_rejects_bad_type() {
        assert!(parse("CREATE TABLE t (a 'text')").is_err());
        assert!(parse("CREATE TABLE t (a VARCHAR(x))").is_err());
        assert!(parse("CREATE TABLE t (a DECIMAL(1, 2, 3))").is_err());
        assert!(parse("CREATE TABLE t ()").is_err());
    }

    #[test]
    fn test_parse_drop_table() {
        let stmt = parse("DROP TABLE IF EXISTS users").unwrap();
        assert_eq!(
            stmt,
            Statement::DropTable(DropTableStatement {
                table: TableName::new("users"),
                if_exists: true,
            })
        );
    }

    #[test]
    fn test_parse_insert() {
        let stmt = parse("INSERT INTO users (id, name) VALUES (1, 'John'), (-2, 'Jane')").unwrap();

        match stmt {
            Statement::Insert(insert) => {
                assert_eq!(insert.table, TableName::new("users"));
                assert_eq!(
                    insert.columns,
                    Some(vec!["id".to_string(), "name".to_string()])
                );
                assert_eq!(insert.values.len(), 2);
                assert_eq!(
                    insert.values[1][0],
                    Expression::unary(
                        UnaryOperator::Minus,
                        Expression::literal(Value::Integer(2))
                    )
                );
            }
            _ => panic!("Expected INSERT statement"),
        }
    }

    #[test]
    fn test_parse_select() {
        let stmt =
            parse("SELECT * FROM users WHERE (age > 18) AND (status = 'active')").unwrap();
        match stmt {
            Statement::Select(select) => {
                assert_eq!(select.projection, Projection::AllColumns);
                assert!(matches!(
                    select.where_clause,
                    Some(Expression::Binary {
                        op: BinaryOperator::And,
                        ..
                    })
                ));
            }
            _ => panic!("Expected SELECT statement"),
        }

        let stmt = parse("SELECT id, name FROM users").unwrap();
        match stmt {
            Statement::Select(select) => {
                assert_eq!(
                    select.projection,
                    Projection::Columns(vec!["id".to_string(), "name".to_string()])
                );
                assert!(select.where_clause.is_none());
            }
            _ => panic!("Expected SELECT statement"),
        }
    }

    #[test]
    fn test_parse_update() {
        let stmt =
            parse("UPDATE users SET name = 'John Doe', (a, b) = (b, a) WHERE id = 1").unwrap();

        match stmt {
            Statement::Update(update) => {
                assert_eq!(update.table, TableName::new("users"));
                assert_eq!(update.assignments.len(), 2);
                assert_eq!(update.assignments[0].columns, vec!["name".to_string()]);
                assert_eq!(
                    update.assignments[1].columns,
                    vec!["a".to_string(), "b".to_string()]
                );
                assert!(matches!(update.assignments[1].value, Expression::Group(_)));
                assert!(update.where_clause.is_some());
            }
            _ => panic!("Expected UPDATE statement"),
        }
    }

    #[test]
    fn test_parse_table_alias() {
        let stmt = parse("UPDATE t AS x SET a = 2 WHERE x.a = 1").unwrap();
        match stmt {
            Statement::Update(update) => {
                assert_eq!(update.table, TableName::new("t").with_alias("x"));
                assert!(update.where_clause.is_some());
            }
            _ => panic!("Expected UPDATE statement"),
        }

        let stmt = parse("SELECT a FROM s.t u WHERE u.a > 0").unwrap();
        match stmt {
            Statement::Select(select) => {
                assert_eq!(select.from, TableName::qualified("s", "t").with_alias("u"));
                assert_eq!(select.from.to_string(), "s.t");
            }
            _ => panic!("Expected SELECT statement"),
        }

        let stmt = parse("DELETE FROM t AS gone").unwrap();
        assert_eq!(
            stmt,
            Statement::Delete(DeleteStatement {
                table: TableName::new("t").with_alias("gone"),
                where_clause: None,
            })
        );

        assert!(parse("UPDATE t AS SET a = 2").is_err());
    }

    #[test]
    fn test_parse_delete() {
        let stmt = parse("DELETE FROM users").unwrap();
        assert_eq!(
            stmt,
            Statement::Delete(DeleteStatement {
                table: TableName::new("users"),
                where_clause: None,
            })
        );
    }

    #[test]
    fn test_parse_statements() {
        let tokens = tokenize(
            "CREATE TABLE t (a INT); INSERT INTO t VALUES (1);; SELECT a FROM t;",
        );
        let statements = Parser::new(&tokens).parse_statements().unwrap();
        assert_eq!(statements.len(), 3);
        assert!(matches!(statements[2], Statement::Select(_)));
    }

    #[test]
    fn test_trailing_garbage_is_rejected() {
        assert!(parse("DELETE FROM users u extra").is_err());
        assert!(parse("SELEC * FROM users").is_err());
    }
}
