//! Interactive chat settings

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for the interactive chat loop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatConfig {
    /// Number of previous turns carried as context
    #[serde(default = "default_history_size")]
    pub history_size: usize,
    /// Directory for daily interaction logs
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

fn default_history_size() -> usize {
    5
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            history_size: default_history_size(),
            log_dir: default_log_dir(),
        }
    }
}
