use anyhow::Result;
use kestreldb::access::{AccessError, Value};
use kestreldb::executor::{ExecutionError, QueryResult};
use kestreldb::expression::ExpressionError;
use kestreldb::session::Session;
use kestreldb::sql::TableName;
use std::io::Write;

fn rows(result: &QueryResult) -> Vec<Vec<Value>> {
    match result {
        QueryResult::Rows { rows, .. } => rows.clone(),
        other => panic!("expected rows, got {:?}", other),
    }
}

fn int_rows(result: &QueryResult) -> Vec<Vec<i64>> {
    rows(result)
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|value| match value {
                    Value::Integer(i) => i,
                    other => panic!("expected integer, got {:?}", other),
                })
                .collect()
        })
        .collect()
}

fn execution_error(err: &anyhow::Error) -> &ExecutionError {
    err.downcast_ref::<ExecutionError>()
        .expect("error should come from the executor")
}

#[test]
fn test_default_values_scenario() -> Result<()> {
    let mut session = Session::new();
    session.execute(
        "CREATE TABLE t (col1 INTEGER DEFAULT NULL, col2 INTEGER DEFAULT 10, col3 INTEGER DEFAULT NULL);
         INSERT INTO t (col1, col3) VALUES (1, 3);
         INSERT INTO t (col1) VALUES (1);",
    )?;

    let table = session.database().table(&TableName::new("t"))?;
    assert_eq!(table.lookup("col1", &Value::Integer(1))?.len(), 2);
    assert_eq!(table.lookup("col2", &Value::Integer(10))?.len(), 2);
    assert_eq!(table.lookup("col3", &Value::Integer(3))?.len(), 1);
    assert_eq!(table.lookup("col3", &Value::Null)?.len(), 1);
    Ok(())
}

#[test]
fn test_update_scenario() -> Result<()> {
    let mut session = Session::new();
    let results = session.execute(
        "CREATE TABLE t (col1 INTEGER, col2 INTEGER, col3 INTEGER);
         INSERT INTO t VALUES (2, -3, 2), (1, 1, 2);
         UPDATE t SET col1 = 0, col2 = 0 WHERE (col1 + col2) < 0;
         SELECT * FROM t;",
    )?;

    assert_eq!(results[2], QueryResult::Updated(1));
    let mut values = int_rows(&results[3]);
    values.sort();
    assert_eq!(values, vec![vec![0, 0, 2], vec![1, 1, 2]]);

    let table = session.database().table(&TableName::new("t"))?;
    assert!(table.lookup("col2", &Value::Integer(-3))?.is_empty());
    assert_eq!(table.lookup("col3", &Value::Integer(2))?.len(), 2);
    Ok(())
}

#[test]
fn test_select_filters() -> Result<()> {
    let mut session = Session::new();
    session.execute(
        "CREATE TABLE items (id INT, name VARCHAR(20), price FLOAT);
         INSERT INTO items VALUES (1, 'pen', 1.5), (2, 'book', 12), (3, 'lamp', NULL), (4, 'desk', 150.0);",
    )?;

    let results = session.execute(
        "SELECT id FROM items WHERE price BETWEEN 1 AND 20;
         SELECT id FROM items WHERE price IS NULL;
         SELECT id FROM items WHERE price NOT BETWEEN 1 AND 20;
         SELECT name FROM items WHERE (id = 2) OR (name = 'desk');",
    )?;

    assert_eq!(int_rows(&results[0]), vec![vec![1], vec![2]]);
    assert_eq!(int_rows(&results[1]), vec![vec![3]]);
    // NULL prices are rejected by both forms
    assert_eq!(int_rows(&results[2]), vec![vec![4]]);
    assert_eq!(
        rows(&results[3]),
        vec![
            vec![Value::Text("book".to_string())],
            vec![Value::Text("desk".to_string())]
        ]
    );
    Ok(())
}

#[test]
fn test_swap_assignment_and_delete() -> Result<()> {
    let mut session = Session::new();
    let results = session.execute(
        "CREATE TABLE pairs (a INTEGER, b INTEGER);
         INSERT INTO pairs VALUES (1, 2), (3, 4), (5, 6);
         UPDATE pairs SET (a, b) = (b, a) WHERE a < 4;
         DELETE FROM pairs WHERE a = 5;
         SELECT a, b FROM pairs;",
    )?;

    assert_eq!(results[2], QueryResult::Updated(2));
    assert_eq!(results[3], QueryResult::Deleted(1));
    let mut values = int_rows(&results[4]);
    values.sort();
    assert_eq!(values, vec![vec![2, 1], vec![4, 3]]);
    Ok(())
}

#[test]
fn test_failed_update_keeps_every_row() -> Result<()> {
    let mut session = Session::new();
    session.execute(
        "CREATE TABLE ledger (id INTEGER UNIQUE, amount INTEGER);
         INSERT INTO ledger VALUES (1, 5), (2, 0), (3, 7);",
    )?;

    let err = session
        .execute("UPDATE ledger SET amount = 100 / amount")
        .unwrap_err();
    assert_eq!(
        execution_error(&err),
        &ExecutionError::Expression(ExpressionError::DivisionByZero)
    );

    let err = session.execute("UPDATE ledger SET id = 9").unwrap_err();
    assert!(matches!(
        execution_error(&err),
        ExecutionError::Access(AccessError::UniqueViolation { .. })
    ));

    let results = session.execute("SELECT id, amount FROM ledger")?;
    let mut values = int_rows(&results[0]);
    values.sort();
    assert_eq!(values, vec![vec![1, 5], vec![2, 0], vec![3, 7]]);
    Ok(())
}

#[test]
fn test_declared_types_and_aliases() -> Result<()> {
    let mut session = Session::new();
    let results = session.execute(
        "CREATE TABLE notes (body CLOB, rank TINYINT, stamp DATETIME);
         INSERT INTO notes VALUES ('hi', 1, 2.5), ('yo', 2, NULL);
         UPDATE notes AS n SET rank = 10 WHERE n.rank = 1;
         DELETE FROM notes n WHERE n.body = 'yo';
         SELECT rank FROM notes AS n;",
    )?;

    assert_eq!(results[2], QueryResult::Updated(1));
    assert_eq!(results[3], QueryResult::Deleted(1));
    assert_eq!(int_rows(&results[4]), vec![vec![10]]);

    let err = session
        .execute("INSERT INTO notes VALUES (1, 1, 1.0)")
        .unwrap_err();
    assert!(matches!(
        execution_error(&err),
        ExecutionError::Access(AccessError::TypeMismatch { .. })
    ));
    Ok(())
}

#[test]
fn test_schemas_and_drop() -> Result<()> {
    let mut session = Session::new();
    session.execute(
        "CREATE TABLE app.users (id INTEGER, email TEXT);
         CREATE TABLE IF NOT EXISTS app.users (other BLOB);
         INSERT INTO app.users VALUES (1, 'a@example.com');",
    )?;

    let results = session.execute("SELECT * FROM app.users")?;
    assert_eq!(
        results[0],
        QueryResult::Rows {
            columns: vec!["id".to_string(), "email".to_string()],
            rows: vec![vec![
                Value::Integer(1),
                Value::Text("a@example.com".to_string())
            ]],
        }
    );

    let err = session.execute("SELECT * FROM users").unwrap_err();
    assert!(matches!(
        execution_error(&err),
        ExecutionError::UnknownTable { .. }
    ));

    session.execute("DROP TABLE app.users; DROP TABLE IF EXISTS app.users")?;
    assert!(session.database().table_names(Some("app")).is_empty());
    Ok(())
}

#[test]
fn test_constraints() -> Result<()> {
    let mut session = Session::new();
    session.execute(
        "CREATE TABLE accounts (id INTEGER PRIMARY KEY, handle TEXT UNIQUE, note TEXT NOT NULL DEFAULT '');
         INSERT INTO accounts (id, handle) VALUES (1, 'ann');",
    )?;

    let err = session
        .execute("INSERT INTO accounts (id, handle) VALUES (2, 'bob'), (3, 'ann')")
        .unwrap_err();
    assert!(matches!(
        execution_error(&err),
        ExecutionError::Access(AccessError::UniqueViolation { .. })
    ));
    // The first row of the failed statement was rolled back
    let table = session.database().table(&TableName::new("accounts"))?;
    assert_eq!(table.len(), 1);
    assert!(table.lookup("handle", &Value::Text("bob".to_string()))?.is_empty());

    let err = session
        .execute("INSERT INTO accounts (handle) VALUES ('cat')")
        .unwrap_err();
    assert!(matches!(
        execution_error(&err),
        ExecutionError::Access(AccessError::NotNullViolation { .. })
    ));

    let err = session
        .execute("UPDATE accounts SET id = 'one'")
        .unwrap_err();
    assert!(matches!(
        execution_error(&err),
        ExecutionError::Access(AccessError::TypeMismatch { .. })
    ));

    // Several NULLs never clash in a UNIQUE column
    session.execute("INSERT INTO accounts (id, handle) VALUES (2, NULL), (3, NULL)")?;
    Ok(())
}

#[test]
fn test_evaluation_errors() -> Result<()> {
    let mut session = Session::new();
    session.execute(
        "CREATE TABLE t (a INTEGER, b TEXT);
         INSERT INTO t VALUES (1, 'x');",
    )?;

    let err = session.execute("SELECT * FROM t WHERE (a / 0) = 1").unwrap_err();
    assert_eq!(
        execution_error(&err),
        &ExecutionError::Expression(ExpressionError::DivisionByZero)
    );

    let err = session.execute("SELECT * FROM t WHERE b LIKE 'x%'").unwrap_err();
    assert!(matches!(
        execution_error(&err),
        ExecutionError::Expression(ExpressionError::Unsupported { .. })
    ));

    let err = session.execute("INSERT INTO t VALUES (1 + 1, 'y')").unwrap_err();
    assert!(matches!(
        execution_error(&err),
        ExecutionError::NonLiteralValue { .. }
    ));
    Ok(())
}

#[test]
fn test_script_file() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(
        file,
        "-- inventory\nCREATE TABLE stock (sku TEXT, qty INTEGER, tag BLOB);\n\
         INSERT INTO stock VALUES ('a-1', 5, x'00ff'), ('b-2', 0, NULL);\n\
         /* low stock */\nSELECT sku FROM stock WHERE qty <= 0;"
    )?;

    let mut session = Session::new();
    let results = session.execute_file(file.path())?;
    assert_eq!(results.len(), 3);
    assert_eq!(results[1], QueryResult::Inserted(2));
    assert_eq!(rows(&results[2]), vec![vec![Value::Text("b-2".to_string())]]);

    let table = session.database().table(&TableName::new("stock"))?;
    assert_eq!(
        table.lookup("tag", &Value::Bytes(vec![0x00, 0xff]))?.len(),
        1
    );
    Ok(())
}

#[test]
fn test_missing_script_file() {
    let mut session = Session::new();
    let err = session
        .execute_file("/nonexistent/kestreldb/script.sql")
        .unwrap_err();
    assert!(err.to_string().starts_with("Failed to read"));
}
