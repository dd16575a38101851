//! Statement driver: tokenize a script, then parse and execute its
//! statements one after another against a single database.

use crate::database::Database;
use crate::executor::{execute_statement, QueryResult};
use crate::sql::{tokenize, Parser};
use anyhow::{Context, Result};
use log::debug;
use std::path::Path;

#[derive(Debug, Default)]
pub struct Session {
    db: Database,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Run every statement of `sql` in order.
    ///
    /// Statements run as soon as they are parsed, so the ones before a
    /// failing statement keep their effect.
    pub fn execute(&mut self, sql: &str) -> Result<Vec<QueryResult>> {
        let tokens = tokenize(sql);
        let mut parser = Parser::new(&tokens);
        let mut results = Vec::new();

        while let Some(statement) = parser.next_statement() {
            let statement = statement
                .with_context(|| format!("Failed to parse statement {}", results.len() + 1))?;
            debug!("Executing {:?}", statement);
            let result = execute_statement(&mut self.db, &statement)
                .with_context(|| format!("Failed to execute statement {}", results.len() + 1))?;
            results.push(result);
        }
        Ok(results)
    }

    /// Read a script file and run it
    pub fn execute_file(&mut self, path: impl AsRef<Path>) -> Result<Vec<QueryResult>> {
        let path = path.as_ref();
        let sql = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        self.execute(&sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::Value;
    use crate::executor::ExecutionError;
    use crate::sql::TableName;

    #[test]
    fn test_session_round_trip() -> Result<()> {
        let mut session = Session::new();
        let results = session.execute(
            "CREATE TABLE t (a INTEGER, b TEXT);
             INSERT INTO t VALUES (1, 'one'), (2, 'two');
             SELECT b FROM t WHERE a = 2;",
        )?;

        assert_eq!(results.len(), 3);
        assert_eq!(results[1], QueryResult::Inserted(2));
        assert_eq!(
            results[2],
            QueryResult::Rows {
                columns: vec!["b".to_string()],
                rows: vec![vec![Value::Text("two".to_string())]],
            }
        );
        Ok(())
    }

    #[test]
    fn test_session_stops_at_first_error() {
        let mut session = Session::new();
        let err = session
            .execute("CREATE TABLE t (a INTEGER); INSERT INTO missing VALUES (1); DROP TABLE t")
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to execute statement 2");
        assert!(matches!(
            err.downcast_ref::<ExecutionError>(),
            Some(ExecutionError::UnknownTable { .. })
        ));
        // Statements before the failure keep their effect, later ones never run
        assert!(session.database().has_table(&TableName::new("t")));
    }

    #[test]
    fn test_session_parse_error() {
        let mut session = Session::new();
        let err = session.execute("SELEC * FROM t").unwrap_err();
        assert_eq!(err.to_string(), "Failed to parse statement 1");
    }
}
