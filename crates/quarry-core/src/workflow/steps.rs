//! Step handlers
//!
//! Each handler takes the session by value and returns the derived session.
//! No fault escapes a handler: failures become `error` plus a history entry.

use super::engine::QueryWorkflow;
use super::error::ExecutionFault;
use super::prompts;
use super::step::StepName;
use crate::session::{HistoryEntry, QuerySession};
use crate::value::Row;
use tracing::{debug, info, warn};

/// Response used when the query returned no rows
pub const NO_RESULTS_RESPONSE: &str = "No results found for your query.";

/// Rows plus the query zero-row recovery substituted, if any
struct Execution {
    rows: Vec<Row>,
    recovered_query: Option<String>,
}

impl QueryWorkflow {
    /// Question → SQL
    pub async fn generate_sql(&self, mut state: QuerySession) -> QuerySession {
        let instruction =
            prompts::generation_instruction(&self.config().sql_dialect, self.schema());

        match self
            .generator()
            .generate_text(&instruction, state.question())
            .await
        {
            Ok(text) => {
                let sql = prompts::strip_code_fences(&text);
                debug!(session = %state.session_id, sql = %sql, "Generated SQL");
                state.sql_query = sql.clone();
                state.record(HistoryEntry::output(StepName::GenerateSql, sql.clone()));
                state.trace(format!("Generated SQL Query:\n{}", sql));
            }
            Err(e) => {
                let message = format!("Failed to generate SQL: {}", e);
                warn!(session = %state.session_id, "{}", message);
                state.error = Some(message.clone());
                state.record(HistoryEntry::error(StepName::GenerateSql, message.clone()));
                state.trace(format!("Error: {}", message));
            }
        }

        state
    }

    /// SQL → rows, with one zero-row value recovery pass
    pub async fn execute_sql(&self, mut state: QuerySession) -> QuerySession {
        match self.run_with_value_recovery(&state.sql_query).await {
            Ok(execution) => {
                let count = execution.rows.len();
                debug!(session = %state.session_id, rows = count, "Query executed");

                if let Some(recovered) = &execution.recovered_query {
                    state.sql_query = recovered.clone();
                }
                state.query_result = execution
                    .rows
                    .into_iter()
                    .map(Row::normalized)
                    .collect();
                state.error = None;
                state.record(
                    HistoryEntry::output(
                        StepName::ExecuteSql,
                        format!("Query executed successfully. {} rows returned.", count),
                    )
                    .with_recovered_query(execution.recovered_query),
                );
                state.trace(format!(
                    "Query executed successfully. Found {} results.",
                    count
                ));
            }
            Err(fault) => {
                let message = format!("Error executing query: {}", fault);
                warn!(session = %state.session_id, "{}", message);
                let recovered = fault.recovered_query().map(str::to_string);
                if let Some(sql) = &recovered {
                    state.sql_query = sql.clone();
                }
                state.error = Some(message.clone());
                state.query_result = Vec::new();
                state.record(
                    HistoryEntry::error(StepName::ExecuteSql, message.clone())
                        .with_recovered_query(recovered),
                );
                state.trace(format!("Error: {}", message));
            }
        }

        state
    }

    /// Failing SQL + fault → repaired SQL
    pub async fn recover_sql(&self, mut state: QuerySession) -> QuerySession {
        let attempt = state.begin_recovery_attempt();
        let prior_error = state.error.clone().unwrap_or_default();
        debug!(session = %state.session_id, attempt, "Repairing SQL");

        let instruction = prompts::repair_instruction(&self.config().sql_dialect, self.schema());
        let message = prompts::repair_message(
            state.question(),
            &state.sql_query,
            &prior_error,
            state.history(),
        );

        match self.generator().generate_text(&instruction, &message).await {
            Ok(text) => {
                let sql = prompts::strip_code_fences(&text);
                state.sql_query = sql.clone();
                state.error = None;
                state.record(HistoryEntry::output(
                    StepName::RecoverSql,
                    format!("SQL query corrected based on error: {}", prior_error),
                ));
                state.trace(format!("SQL Query corrected:\n{}", sql));
            }
            Err(e) => {
                let message = format!("Failed to recover SQL: {}", e);
                warn!(session = %state.session_id, attempt, "{}", message);
                state.error = Some(message.clone());
                state.record(HistoryEntry::error(StepName::RecoverSql, message.clone()));
                state.trace(format!("Error: {}", message));
            }
        }

        state
    }

    /// Rows → natural-language answer
    pub async fn generate_response(&self, mut state: QuerySession) -> QuerySession {
        if state.query_result.is_empty() {
            state.response = Some(NO_RESULTS_RESPONSE.to_string());
            state.record(HistoryEntry::output(
                StepName::GenerateResponse,
                "No results to summarize",
            ));
            state.trace(NO_RESULTS_RESPONSE);
            return state;
        }

        let results = match serde_json::to_string_pretty(&state.query_result) {
            Ok(json) => json,
            Err(e) => {
                return self.response_failed(state, e.to_string());
            }
        };
        let message = prompts::summary_message(state.question(), &results);

        match self
            .generator()
            .generate_text(prompts::SUMMARY_INSTRUCTION, &message)
            .await
        {
            Ok(text) => {
                let response = text.trim().to_string();
                info!(session = %state.session_id, "Generated response");
                state.response = Some(response.clone());
                state.record(HistoryEntry::output(
                    StepName::GenerateResponse,
                    "Generated natural language response",
                ));
                state.trace(response);
            }
            Err(e) => return self.response_failed(state, e.to_string()),
        }

        state
    }

    fn response_failed(&self, mut state: QuerySession, cause: String) -> QuerySession {
        let message = format!("Failed to generate response: {}", cause);
        warn!(session = %state.session_id, "{}", message);
        state.error = Some(message.clone());
        state.record(HistoryEntry::error(
            StepName::GenerateResponse,
            message.clone(),
        ));
        state.trace(format!("Error: {}", message));
        state
    }

    async fn run_with_value_recovery(&self, sql: &str) -> Result<Execution, ExecutionFault> {
        if sql.trim().is_empty() {
            return Err(ExecutionFault::EmptyQuery);
        }

        let rows = self.executor().execute(sql).await?;
        if !rows.is_empty() {
            return Ok(Execution {
                rows,
                recovered_query: None,
            });
        }

        debug!("Query returned no rows, trying value recovery");
        let recovered = self.recoverer().recover_query(sql).await?;
        for suggestion in &recovered.suggestions {
            info!("Value suggestion: {}", suggestion);
        }

        let rows = match self.executor().execute(&recovered.sql).await {
            Ok(rows) => rows,
            Err(source) => {
                return Err(ExecutionFault::RecoveredQuery {
                    sql: recovered.sql,
                    source,
                })
            }
        };
        Ok(Execution {
            rows,
            recovered_query: Some(recovered.sql),
        })
    }
}
