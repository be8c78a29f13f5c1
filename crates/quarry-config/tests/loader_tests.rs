//! Integration tests for config loading from disk

use quarry_config::{ConfigError, ConfigLoader, LlmProviderType};
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_full_config() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(
        &path,
        r#"
[database]
path = "data/rental.db"
busy_timeout_ms = 250

[llm]
provider = "ollama"
model = "qwen2.5-coder"
temperature = 0.1

[workflow]
max_recovery_attempts = 2
sql_dialect = "PostgreSQL"

[recovery]
columns = [{ table = "film", column = "title" }]
min_score = 20

[chat]
history_size = 3
log_dir = "chat-logs"

[web]
port = 9000
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&path).unwrap();
    assert_eq!(
        config.database.path.as_deref(),
        Some(temp.path().join("data/rental.db").as_path())
    );
    assert_eq!(config.database.busy_timeout_ms, 250);
    assert_eq!(config.llm.provider, LlmProviderType::Ollama);
    assert_eq!(config.llm.model(), "qwen2.5-coder");
    assert_eq!(config.workflow.max_recovery_attempts, 2);
    assert_eq!(config.workflow.sql_dialect, "PostgreSQL");
    assert_eq!(config.recovery.min_score, 20);
    assert_eq!(config.chat.history_size, 3);
    assert_eq!(config.web.port, 9000);
    assert_eq!(config.web.host, "127.0.0.1");
}

#[test]
fn test_absolute_database_path_kept() {
    let temp = TempDir::new().unwrap();
    let config = ConfigLoader::load_from_str(
        r#"
[database]
path = "/var/lib/quarry/app.db"
"#,
        temp.path(),
    )
    .unwrap();
    assert_eq!(
        config.database.path.as_deref(),
        Some(std::path::Path::new("/var/lib/quarry/app.db"))
    );
}

#[test]
fn test_missing_file_is_io_error() {
    let temp = TempDir::new().unwrap();
    let result = ConfigLoader::load_from_file(temp.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::Io { .. })));
}

#[test]
fn test_invalid_toml_reports_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.toml");
    fs::write(&path, "[llm\nprovider = ").unwrap();

    match ConfigLoader::load_from_file(&path) {
        Err(ConfigError::Parse { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_unknown_provider_rejected() {
    let temp = TempDir::new().unwrap();
    let result = ConfigLoader::load_from_str("[llm]\nprovider = \"bard\"\n", temp.path());
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn test_validation_runs_on_load() {
    let temp = TempDir::new().unwrap();
    let result =
        ConfigLoader::load_from_str("[workflow]\nmax_recovery_attempts = 0\n", temp.path());
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
#[serial]
fn test_env_reference_in_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "[llm]\napi_key = \"{env:QUARRY_LOADER_TEST_KEY}\"\n").unwrap();

    std::env::set_var("QUARRY_LOADER_TEST_KEY", "sk-loader");
    let config = ConfigLoader::load_from_file(&path).unwrap();
    std::env::remove_var("QUARRY_LOADER_TEST_KEY");

    assert_eq!(config.llm.api_key.as_deref(), Some("sk-loader"));
    assert_eq!(config.llm.resolved_api_key().as_deref(), Some("sk-loader"));
}

#[test]
#[serial]
fn test_missing_env_reference_fails() {
    std::env::remove_var("QUARRY_LOADER_UNSET");
    let temp = TempDir::new().unwrap();
    let result = ConfigLoader::load_from_str(
        "[llm]\napi_key = \"{env:QUARRY_LOADER_UNSET}\"\n",
        temp.path(),
    );
    assert!(matches!(result, Err(ConfigError::EnvVarNotFound { .. })));
}
