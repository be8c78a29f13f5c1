use serde::Serialize;
use std::fmt;

/// The four workflow steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepName {
    /// Question → SQL
    GenerateSql,
    /// SQL → rows (with zero-row value recovery)
    ExecuteSql,
    /// Failing SQL + fault → repaired SQL
    RecoverSql,
    /// Rows → natural-language answer
    GenerateResponse,
}

impl StepName {
    /// Stable name used in history entries and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            StepName::GenerateSql => "generate_sql",
            StepName::ExecuteSql => "execute_sql",
            StepName::RecoverSql => "recover_sql",
            StepName::GenerateResponse => "generate_response",
        }
    }
}

impl fmt::Display for StepName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the workflow goes after a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Run another step
    Step(StepName),
    /// Stop; the session is final
    End,
}
