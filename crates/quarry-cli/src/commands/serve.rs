use crate::factories;
use anyhow::Result;
use quarry_config::QuarryConfig;
use std::sync::Arc;

/// Run the HTTP API until interrupted
pub async fn execute(mut config: QuarryConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.web.host = host;
    }
    if let Some(port) = port {
        config.web.port = port;
    }

    let workflow = factories::create_workflow(&config).await?;
    quarry_web::start_server(&config.web, Arc::new(workflow)).await?;
    Ok(())
}
