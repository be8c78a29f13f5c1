//! Top-level configuration

use crate::components::{
    ChatConfig, DatabaseConfig, LlmConfig, LoggingConfig, RecoveryConfig, WebConfig,
    WorkflowConfig,
};
use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

/// Complete Quarry configuration
///
/// # Example TOML
///
/// ```toml
/// [database]
/// path = "~/data/dvdrental.db"
///
/// [llm]
/// provider = "openai"
/// model = "gpt-4o-mini"
/// api_key = "{env:OPENAI_API_KEY}"
///
/// [workflow]
/// max_recovery_attempts = 3
///
/// [recovery]
/// columns = [{ table = "film", column = "title" }]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QuarryConfig {
    /// Database settings
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Language model gateway settings
    #[serde(default)]
    pub llm: LlmConfig,
    /// Workflow engine settings
    #[serde(default)]
    pub workflow: WorkflowConfig,
    /// Zero-row value recovery settings
    #[serde(default)]
    pub recovery: RecoveryConfig,
    /// Interactive chat settings
    #[serde(default)]
    pub chat: ChatConfig,
    /// HTTP endpoint settings
    #[serde(default)]
    pub web: WebConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl QuarryConfig {
    /// Check values that serde cannot express
    pub fn validate(&self) -> ConfigResult<()> {
        if self.workflow.max_recovery_attempts == 0 {
            return Err(ConfigError::Invalid(
                "workflow.max_recovery_attempts must be at least 1".to_string(),
            ));
        }
        if self.chat.history_size == 0 {
            return Err(ConfigError::Invalid(
                "chat.history_size must be at least 1".to_string(),
            ));
        }
        if let Some(temp) = self.llm.temperature {
            if !(0.0..=2.0).contains(&temp) {
                return Err(ConfigError::Invalid(format!(
                    "llm.temperature must be within 0.0-2.0, got {}",
                    temp
                )));
            }
        }
        for column in &self.recovery.columns {
            if column.table.trim().is_empty() || column.column.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "recovery.columns entries need both table and column".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Database path, or an error naming the missing setting
    pub fn database_path(&self) -> ConfigResult<&std::path::Path> {
        self.database.path.as_deref().ok_or_else(|| {
            ConfigError::Invalid("database.path is not set (use --db or [database] path)".into())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: QuarryConfig = toml::from_str("").unwrap();
        assert_eq!(config, QuarryConfig::default());
        assert_eq!(config.workflow.max_recovery_attempts, 3);
        assert_eq!(config.chat.history_size, 5);
        assert_eq!(config.web.port, 8001);
        assert!(config.database.read_only);
    }

    #[test]
    fn test_validate_rejects_zero_budget() {
        let mut config = QuarryConfig::default();
        config.workflow.max_recovery_attempts = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_temperature_out_of_range() {
        let mut config = QuarryConfig::default();
        config.llm.temperature = Some(3.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_database_path_required() {
        let config = QuarryConfig::default();
        assert!(config.database_path().is_err());

        let config = QuarryConfig {
            database: DatabaseConfig::new("/tmp/x.db"),
            ..QuarryConfig::default()
        };
        assert_eq!(
            config.database_path().unwrap(),
            std::path::Path::new("/tmp/x.db")
        );
    }

    #[test]
    fn test_recovery_columns_parse() {
        let config: QuarryConfig = toml::from_str(
            r#"
            [recovery]
            columns = [
                { table = "film", column = "title" },
                { table = "category", column = "name" },
            ]
            "#,
        )
        .unwrap();
        assert_eq!(config.recovery.columns.len(), 2);
        assert_eq!(config.recovery.columns[1].table, "category");
    }
}
