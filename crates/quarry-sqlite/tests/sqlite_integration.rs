//! Executor, schema and recovery against a real database file

mod common;

use quarry_config::{DatabaseConfig, RecoveryConfig, ValueColumn};
use quarry_core::test_support::ScriptedGenerator;
use quarry_core::{
    CellValue, DbError, QueryExecutor, QueryWorkflow, SchemaProvider, ValueRecoverer,
};
use quarry_sqlite::{SqliteConnector, SqliteExecutor, SqliteSchemaProvider, ValuePatternRecoverer};
use std::sync::Arc;

fn recovery_config() -> RecoveryConfig {
    RecoveryConfig {
        columns: vec![
            ValueColumn::new("film", "title"),
            ValueColumn::new("category", "name"),
        ],
        min_score: 0,
    }
}

#[tokio::test]
async fn test_executor_returns_rows() {
    let db = common::rental_db();
    let executor = SqliteExecutor::new(SqliteConnector::new(&db.path));

    let rows = executor
        .execute("SELECT title, rental_rate FROM film WHERE rating = 'NC-17' ORDER BY title")
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("title"), Some(&CellValue::from("ALIEN CENTER")));
    assert_eq!(rows[1].get("rental_rate"), Some(&CellValue::Float(4.99)));
}

#[tokio::test]
async fn test_executor_classifies_faults() {
    let db = common::rental_db();
    let executor = SqliteExecutor::new(SqliteConnector::new(&db.path));

    let err = executor.execute("SELECT nope FROM film").await.unwrap_err();
    assert!(matches!(err, DbError::Syntax(_)), "{err:?}");

    let err = executor
        .execute("INSERT INTO category VALUES (3, 'Horror')")
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::Execution(_)), "{err:?}");

    let missing = SqliteExecutor::new(SqliteConnector::new(db.path.with_file_name("missing.db")));
    let err = missing.execute("SELECT 1").await.unwrap_err();
    assert!(matches!(err, DbError::Connection(_)), "{err:?}");
}

#[tokio::test]
async fn test_writable_connector_allows_writes() {
    let db = common::rental_db();
    let connector =
        SqliteConnector::from_config(&DatabaseConfig::new(&db.path).writable()).unwrap();
    let executor = SqliteExecutor::new(connector);

    executor
        .execute("INSERT INTO category VALUES (3, 'Horror')")
        .await
        .unwrap();
    let rows = executor.execute("SELECT COUNT(*) AS n FROM category").await.unwrap();
    assert_eq!(rows[0].get("n"), Some(&CellValue::Integer(3)));
}

#[tokio::test]
async fn test_schema_provider_describes_tables() {
    let db = common::rental_db();
    let provider = SqliteSchemaProvider::load(&SqliteConnector::new(&db.path))
        .await
        .unwrap();

    assert_eq!(provider.tables().len(), 3);
    let description = provider.schema_description();
    assert!(description.contains("Table: film\n"));
    assert!(description.contains("  - title (TEXT) NOT NULL"));
    assert!(description.contains("  - film_id -> film(film_id)"));
}

#[tokio::test]
async fn test_recoverer_rewrites_literal() {
    let db = common::rental_db();
    let recoverer =
        ValuePatternRecoverer::new(SqliteConnector::new(&db.path), &recovery_config());

    let recovered = recoverer
        .recover_query("SELECT * FROM film WHERE title = 'zoro ark'")
        .await
        .unwrap();

    assert_eq!(recovered.sql, "SELECT * FROM film WHERE title = 'ZORRO ARK'");
    assert_eq!(recovered.suggestions.len(), 1);
    assert_eq!(recovered.suggestions[0].column, "title");
}

#[tokio::test]
async fn test_recoverer_without_columns_is_passthrough() {
    let db = common::rental_db();
    let recoverer =
        ValuePatternRecoverer::new(SqliteConnector::new(&db.path), &RecoveryConfig::default());

    let sql = "SELECT * FROM film WHERE title = 'nothing like it'";
    let recovered = recoverer.recover_query(sql).await.unwrap();
    assert_eq!(recovered.sql, sql);
    assert!(recovered.suggestions.is_empty());
}

#[tokio::test]
async fn test_workflow_recovers_zero_row_query_end_to_end() {
    let db = common::rental_db();
    let connector = SqliteConnector::new(&db.path);
    let schema = SqliteSchemaProvider::load(&connector).await.unwrap();
    let generator = ScriptedGenerator::new()
        .reply("```sql\nSELECT title, rating FROM film WHERE title = 'zorro ark';\n```")
        .reply("ZORRO ARK is rated NC-17.");

    let workflow = QueryWorkflow::builder()
        .generator(Arc::new(generator.clone()))
        .executor(Arc::new(SqliteExecutor::new(connector.clone())))
        .recoverer(Arc::new(ValuePatternRecoverer::new(connector, &recovery_config())))
        .schema(&schema)
        .build()
        .unwrap();

    let session = workflow.run_question("what is zorro ark rated?").await.unwrap();

    assert_eq!(session.error, None);
    assert_eq!(session.query_result.len(), 1);
    assert_eq!(
        session.executed_query(),
        Some("SELECT title, rating FROM film WHERE title = 'ZORRO ARK';")
    );
    assert_eq!(session.response.as_deref(), Some("ZORRO ARK is rated NC-17."));
    assert!(generator.calls()[0].system_instruction.contains("Table: film_category"));
}
