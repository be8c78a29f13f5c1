//! Wiring from configuration to a ready workflow

use crate::cli::Cli;
use anyhow::{Context, Result};
use quarry_config::{ConfigLoader, QuarryConfig};
use quarry_core::QueryWorkflow;
use quarry_llm::create_text_generator;
use quarry_sqlite::{SqliteConnector, SqliteExecutor, SqliteSchemaProvider, ValuePatternRecoverer};
use std::sync::Arc;
use tracing::info;

/// Load configuration and apply command-line overrides
pub fn load_config(cli: &Cli) -> Result<QuarryConfig> {
    let mut config =
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?;

    if let Some(db) = &cli.db {
        config.database.path = Some(db.clone());
    }
    Ok(config)
}

/// Connector for the configured database
pub fn create_connector(config: &QuarryConfig) -> Result<SqliteConnector> {
    config.database_path()?;
    SqliteConnector::from_config(&config.database).context("Invalid database settings")
}

/// Introspect the configured database
pub async fn load_schema(config: &QuarryConfig) -> Result<SqliteSchemaProvider> {
    let connector = create_connector(config)?;
    SqliteSchemaProvider::load(&connector)
        .await
        .with_context(|| format!("Failed to read schema from {}", connector.path().display()))
}

/// Build the full workflow: gateway, executor, recoverer and schema
pub async fn create_workflow(config: &QuarryConfig) -> Result<QueryWorkflow> {
    let connector = create_connector(config)?;
    let schema = load_schema(config).await?;
    let generator =
        create_text_generator(&config.llm).context("Failed to create language model gateway")?;

    info!(
        provider = generator.provider_name(),
        model = generator.model_name(),
        database = %connector.path().display(),
        "Workflow ready"
    );

    QueryWorkflow::builder()
        .generator(generator)
        .executor(Arc::new(SqliteExecutor::new(connector.clone())))
        .recoverer(Arc::new(ValuePatternRecoverer::new(
            connector,
            &config.recovery,
        )))
        .schema(&schema)
        .config(config.workflow.clone())
        .build()
        .context("Failed to build workflow")
}
