use crate::factories;
use anyhow::Result;
use quarry_config::QuarryConfig;
use quarry_core::SchemaProvider;

pub async fn execute(config: QuarryConfig) -> Result<()> {
    let schema = factories::load_schema(&config).await?;
    println!("{}", schema.schema_description());
    Ok(())
}
