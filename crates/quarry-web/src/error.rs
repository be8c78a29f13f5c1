use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use quarry_core::WorkflowError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WebError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The workflow could not run
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// The workflow ran but produced no answer
    #[error("{0}")]
    Unanswered(String),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let detail = self.to_string();
        tracing::warn!(%detail, "Request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": detail })),
        )
            .into_response()
    }
}

pub type Result<T> = std::result::Result<T, WebError>;
