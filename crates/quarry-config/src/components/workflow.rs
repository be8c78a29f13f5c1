//! Workflow engine settings

use serde::{Deserialize, Serialize};

/// Settings for the query workflow
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkflowConfig {
    /// Maximum number of error-driven repair attempts per session
    #[serde(default = "default_max_recovery_attempts")]
    pub max_recovery_attempts: u32,
    /// SQL dialect named in generation and repair prompts
    #[serde(default = "default_dialect")]
    pub sql_dialect: String,
}

fn default_max_recovery_attempts() -> u32 {
    3
}

fn default_dialect() -> String {
    "SQLite".to_string()
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            max_recovery_attempts: default_max_recovery_attempts(),
            sql_dialect: default_dialect(),
        }
    }
}
