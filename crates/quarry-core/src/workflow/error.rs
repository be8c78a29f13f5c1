//! Workflow error types

use super::step::StepName;
use crate::traits::{DbError, RecoveryError};
use thiserror::Error;

/// Faults inside `execute_sql`; always converted into the session's `error`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExecutionFault {
    /// Nothing to run (generation failed or produced no text)
    #[error("no SQL query to execute")]
    EmptyQuery,

    /// The database rejected the query
    #[error(transparent)]
    Database(#[from] DbError),

    /// Zero-row value recovery failed
    #[error("value recovery failed: {0}")]
    Recovery(#[from] RecoveryError),

    /// The database rejected the query substituted by value recovery
    #[error("{source}")]
    RecoveredQuery {
        /// The substituted query
        sql: String,
        /// Database fault
        #[source]
        source: DbError,
    },
}

impl ExecutionFault {
    /// Query substituted by value recovery, when that is what failed
    pub fn recovered_query(&self) -> Option<&str> {
        match self {
            ExecutionFault::RecoveredQuery { sql, .. } => Some(sql),
            _ => None,
        }
    }
}

/// Workflow faults surfaced to the caller instead of a partial answer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkflowError {
    /// A collaborator or setting is missing
    #[error("workflow misconfigured: {0}")]
    Configuration(String),

    /// The session cannot start
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A step broke a session invariant
    #[error("invariant violated after {step}: {detail}")]
    InvariantViolated {
        /// Step that produced the bad state
        step: StepName,
        /// What went wrong
        detail: String,
    },

    /// The dispatcher ran more steps than the repair budget allows
    #[error("workflow exceeded {limit} steps")]
    StepLimitExceeded {
        /// Maximum number of steps for the configured budget
        limit: usize,
    },
}

/// Result type for workflow runs
pub type WorkflowResult<T> = Result<T, WorkflowError>;
