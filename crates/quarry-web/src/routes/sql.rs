//! Question answering endpoint

use crate::WebError;
use axum::{extract::State, routing::post, Json, Router};
use quarry_core::{QueryWorkflow, SessionOutcome};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Shared state for the SQL route
pub type SqlState = Arc<QueryWorkflow>;

/// Request body
#[derive(Debug, Deserialize)]
pub struct Question {
    pub text: String,
}

/// Response body
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Answer {
    pub question: String,
    pub sql_query: String,
    pub answer: String,
}

pub fn sql_routes(state: SqlState) -> Router {
    Router::new()
        .route("/sql", post(sql_handler))
        .with_state(state)
}

/// Run one session; no conversation context is kept between requests
async fn sql_handler(
    State(workflow): State<SqlState>,
    Json(question): Json<Question>,
) -> Result<Json<Answer>, WebError> {
    let session = workflow.run_question(&question.text).await?;
    info!(session = %session.session_id, "Answered HTTP question");

    match session.outcome() {
        SessionOutcome::Answered { response } => Ok(Json(Answer {
            question: question.text,
            sql_query: session.executed_query().unwrap_or_default().to_string(),
            answer: response,
        })),
        SessionOutcome::Failed { error } => Err(WebError::Unanswered(error)),
        SessionOutcome::Incomplete => Err(WebError::Unanswered(
            "query was repaired but the recovery budget ran out before it could be executed"
                .to_string(),
        )),
    }
}
