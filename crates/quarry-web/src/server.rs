use crate::routes::{health_routes, sql_routes};
use crate::{Result, WebError};
use axum::Router;
use quarry_core::QueryWorkflow;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use quarry_config::WebConfig;

/// The full router
pub fn app(workflow: Arc<QueryWorkflow>) -> Router {
    Router::new()
        .merge(sql_routes(workflow))
        .merge(health_routes())
        .layer(TraceLayer::new_for_http())
}

pub async fn start_server(config: &WebConfig, workflow: Arc<QueryWorkflow>) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| WebError::Config(format!("Invalid address: {e}")))?;

    tracing::info!("Starting web server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(WebError::Io)?;

    axum::serve(listener, app(workflow))
        .await
        .map_err(WebError::Io)?;

    Ok(())
}
