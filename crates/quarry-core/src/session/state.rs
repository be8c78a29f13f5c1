//! Query session state
//!
//! One [`QuerySession`] is created per question and threaded through every
//! workflow step by value. The audit trails (`execution_history`, `messages`)
//! and the recovery counter are private so they can only grow.

use crate::value::Row;
use crate::workflow::StepName;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Result of a single step: exactly one of output or error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    /// Step succeeded
    Output(String),
    /// Step failed
    Error(String),
}

/// One entry in the execution history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    /// Which step produced this entry
    pub step: StepName,
    /// What happened
    #[serde(flatten)]
    pub outcome: StepOutcome,
    /// When the step finished
    pub timestamp: DateTime<Utc>,
    /// Query substituted by zero-row value recovery
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovered_query: Option<String>,
}

impl HistoryEntry {
    /// Successful step
    pub fn output(step: StepName, output: impl Into<String>) -> Self {
        Self {
            step,
            outcome: StepOutcome::Output(output.into()),
            timestamp: Utc::now(),
            recovered_query: None,
        }
    }

    /// Failed step
    pub fn error(step: StepName, error: impl Into<String>) -> Self {
        Self {
            step,
            outcome: StepOutcome::Error(error.into()),
            timestamp: Utc::now(),
            recovered_query: None,
        }
    }

    /// Attach the query that zero-row recovery substituted
    pub fn with_recovered_query(mut self, recovered_query: Option<String>) -> Self {
        self.recovered_query = recovered_query;
        self
    }

    /// Output text, if the step succeeded
    pub fn output_text(&self) -> Option<&str> {
        match &self.outcome {
            StepOutcome::Output(text) => Some(text),
            StepOutcome::Error(_) => None,
        }
    }

    /// Error text, if the step failed
    pub fn error_text(&self) -> Option<&str> {
        match &self.outcome {
            StepOutcome::Error(text) => Some(text),
            StepOutcome::Output(_) => None,
        }
    }

    /// Whether the step failed
    pub fn is_error(&self) -> bool {
        matches!(self.outcome, StepOutcome::Error(_))
    }
}

/// How a finished session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// An answer was produced
    Answered {
        /// Natural-language answer
        response: String,
    },
    /// The last fault survived (immediate failure or exhausted budget)
    Failed {
        /// Last fault message
        error: String,
    },
    /// The budget ran out right after a successful repair, so the repaired
    /// query was never executed
    Incomplete,
}

/// State threaded through the workflow for one question
#[derive(Debug, Clone, Serialize)]
pub struct QuerySession {
    /// Correlates log lines for this session
    pub session_id: Uuid,
    question: String,
    /// Most recently attempted SQL (including recovered variants)
    pub sql_query: String,
    /// Present iff the most recent attempt failed
    pub error: Option<String>,
    /// Rows of the last successful execution
    pub query_result: Vec<Row>,
    /// Final answer, set only on success
    pub response: Option<String>,
    execution_history: Vec<HistoryEntry>,
    recovery_attempts: u32,
    messages: Vec<String>,
}

impl QuerySession {
    /// Fresh session for a question
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            question: question.into(),
            sql_query: String::new(),
            error: None,
            query_result: Vec::new(),
            response: None,
            execution_history: Vec::new(),
            recovery_attempts: 0,
            messages: Vec::new(),
        }
    }

    /// The question, including any prepended conversation context
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Every step outcome so far, oldest first
    pub fn history(&self) -> &[HistoryEntry] {
        &self.execution_history
    }

    /// Human-readable trace, oldest first
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Number of repair steps entered
    pub fn recovery_attempts(&self) -> u32 {
        self.recovery_attempts
    }

    /// Append a history entry
    pub fn record(&mut self, entry: HistoryEntry) {
        self.execution_history.push(entry);
    }

    /// Append a trace message
    pub fn trace(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Count one repair attempt; called on entry to the repair step
    pub fn begin_recovery_attempt(&mut self) -> u32 {
        self.recovery_attempts += 1;
        self.recovery_attempts
    }

    /// The SQL that actually produced the result
    ///
    /// Prefers the `recovered_query` of the latest `execute_sql` entry.
    pub fn executed_query(&self) -> Option<&str> {
        let recovered = self
            .execution_history
            .iter()
            .rev()
            .find(|entry| entry.step == StepName::ExecuteSql)
            .and_then(|entry| entry.recovered_query.as_deref());

        recovered.or_else(|| {
            if self.sql_query.is_empty() {
                None
            } else {
                Some(self.sql_query.as_str())
            }
        })
    }

    /// Classify a finished session
    pub fn outcome(&self) -> SessionOutcome {
        match (&self.error, &self.response) {
            (Some(error), _) => SessionOutcome::Failed {
                error: error.clone(),
            },
            (None, Some(response)) => SessionOutcome::Answered {
                response: response.clone(),
            },
            (None, None) => SessionOutcome::Incomplete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let session = QuerySession::new("how many films?");
        assert_eq!(session.question(), "how many films?");
        assert!(session.sql_query.is_empty());
        assert!(session.history().is_empty());
        assert_eq!(session.recovery_attempts(), 0);
        assert_eq!(session.outcome(), SessionOutcome::Incomplete);
        assert_eq!(session.executed_query(), None);
    }

    #[test]
    fn test_history_entry_serializes_single_outcome_key() {
        let entry = HistoryEntry::output(StepName::ExecuteSql, "2 rows")
            .with_recovered_query(Some("SELECT 1".to_string()));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["step"], "execute_sql");
        assert_eq!(json["output"], "2 rows");
        assert!(json.get("error").is_none());
        assert_eq!(json["recovered_query"], "SELECT 1");

        let entry = HistoryEntry::error(StepName::RecoverSql, "boom");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["error"], "boom");
        assert!(json.get("output").is_none());
        assert!(json.get("recovered_query").is_none());
    }

    #[test]
    fn test_executed_query_prefers_recovered() {
        let mut session = QuerySession::new("q");
        session.sql_query = "SELECT * FROM film WHERE title = 'zoro'".to_string();
        session.record(HistoryEntry::output(StepName::ExecuteSql, "0 rows"));
        assert_eq!(
            session.executed_query(),
            Some("SELECT * FROM film WHERE title = 'zoro'")
        );

        session.record(
            HistoryEntry::output(StepName::ExecuteSql, "1 rows")
                .with_recovered_query(Some("SELECT * FROM film WHERE title = 'ZORRO ARK'".into())),
        );
        assert_eq!(
            session.executed_query(),
            Some("SELECT * FROM film WHERE title = 'ZORRO ARK'")
        );
    }

    #[test]
    fn test_outcome_error_wins() {
        let mut session = QuerySession::new("q");
        session.response = Some("answer".into());
        assert_eq!(
            session.outcome(),
            SessionOutcome::Answered {
                response: "answer".into()
            }
        );
        session.error = Some("late failure".into());
        assert_eq!(
            session.outcome(),
            SessionOutcome::Failed {
                error: "late failure".into()
            }
        );
    }
}
