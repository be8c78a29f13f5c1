//! `{env:VAR}` and `{file:path}` references
//!
//! Any string value in the config may be a reference:
//!
//! ```toml
//! [llm]
//! api_key = "{env:OPENAI_API_KEY}"
//!
//! [database]
//! path = "{file:~/.config/quarry/db-path}"
//! ```
//!
//! - `{env:VAR}` is replaced by the variable's value; an unset variable is an error
//! - `{file:path}` is replaced by the trimmed file content; paths may be
//!   relative to the config file or start with `~`

use crate::error::ConfigError;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const FILE_REF_PREFIX: &str = "{file:";
const ENV_REF_PREFIX: &str = "{env:";
const REF_SUFFIX: &str = "}";

fn extract_ref<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    if s.starts_with(prefix) && s.ends_with(REF_SUFFIX) && s.len() > prefix.len() {
        Some(&s[prefix.len()..s.len() - REF_SUFFIX.len()])
    } else {
        None
    }
}

/// Resolve a referenced path against the config file's directory
pub fn resolve_path(path: &str, base_dir: &Path) -> PathBuf {
    let expanded = shellexpand::tilde(path);
    let candidate = PathBuf::from(expanded.as_ref());
    if candidate.is_absolute() {
        candidate
    } else {
        base_dir.join(candidate)
    }
}

/// Replace every reference in a TOML value tree
///
/// All failures are collected so the user sees every broken reference at once.
pub fn process_references(
    value: &mut toml::Value,
    base_dir: &Path,
) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    process_recursive(value, base_dir, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn process_recursive(value: &mut toml::Value, base_dir: &Path, errors: &mut Vec<ConfigError>) {
    match value {
        toml::Value::String(s) => {
            if let Some(file_path) = extract_ref(s, FILE_REF_PREFIX) {
                let resolved = resolve_path(file_path, base_dir);
                debug!("Processing file reference: {} -> {}", file_path, resolved.display());

                match std::fs::read_to_string(&resolved) {
                    Ok(content) => *value = toml::Value::String(content.trim().to_string()),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                        warn!("Referenced file not found: {}", resolved.display());
                        errors.push(ConfigError::ReferenceNotFound(resolved));
                    }
                    Err(e) => errors.push(ConfigError::Io {
                        path: resolved,
                        error: e.to_string(),
                    }),
                }
            } else if let Some(var_name) = extract_ref(s, ENV_REF_PREFIX) {
                debug!("Processing env reference: {}", var_name);

                match std::env::var(var_name) {
                    Ok(env_value) => *value = toml::Value::String(env_value),
                    Err(_) => {
                        warn!("Environment variable not found: {}", var_name);
                        errors.push(ConfigError::EnvVarNotFound {
                            var_name: var_name.to_string(),
                        });
                    }
                }
            }
        }
        toml::Value::Array(arr) => {
            for item in arr.iter_mut() {
                process_recursive(item, base_dir, errors);
            }
        }
        toml::Value::Table(table) => {
            for (_key, val) in table.iter_mut() {
                process_recursive(val, base_dir, errors);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_extract_ref() {
        assert_eq!(extract_ref("{env:OPENAI_API_KEY}", ENV_REF_PREFIX), Some("OPENAI_API_KEY"));
        assert_eq!(extract_ref("{file:key.txt}", FILE_REF_PREFIX), Some("key.txt"));
        assert_eq!(extract_ref("{env:missing-end", ENV_REF_PREFIX), None);
        assert_eq!(extract_ref("plain", ENV_REF_PREFIX), None);
    }

    #[test]
    #[serial]
    fn test_env_ref_string_value() {
        let temp = TempDir::new().unwrap();
        std::env::set_var("QUARRY_TEST_API_KEY", "sk-test-key-12345");

        let mut config: toml::Value = toml::from_str(
            r#"
[llm]
api_key = "{env:QUARRY_TEST_API_KEY}"
"#,
        )
        .unwrap();

        process_references(&mut config, temp.path()).unwrap();
        assert_eq!(
            config["llm"]["api_key"].as_str().unwrap(),
            "sk-test-key-12345"
        );

        std::env::remove_var("QUARRY_TEST_API_KEY");
    }

    #[test]
    fn test_env_ref_not_found() {
        let temp = TempDir::new().unwrap();
        let mut config: toml::Value =
            toml::from_str(r#"api_key = "{env:QUARRY_NONEXISTENT_VAR_12345}""#).unwrap();

        let errors = process_references(&mut config, temp.path()).unwrap_err();
        assert_eq!(errors.len(), 1);
        match &errors[0] {
            ConfigError::EnvVarNotFound { var_name } => {
                assert_eq!(var_name, "QUARRY_NONEXISTENT_VAR_12345")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_file_ref_relative_to_base_dir() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("key.txt"), "  sk-from-file\n").unwrap();

        let mut config: toml::Value = toml::from_str(
            r#"
[llm]
api_key = "{file:key.txt}"
models = ["{file:key.txt}", "static"]
"#,
        )
        .unwrap();

        process_references(&mut config, temp.path()).unwrap();
        assert_eq!(config["llm"]["api_key"].as_str().unwrap(), "sk-from-file");
        assert_eq!(config["llm"]["models"][0].as_str().unwrap(), "sk-from-file");
        assert_eq!(config["llm"]["models"][1].as_str().unwrap(), "static");
    }

    #[test]
    fn test_file_ref_not_found() {
        let temp = TempDir::new().unwrap();
        let mut config: toml::Value = toml::from_str(r#"key = "{file:nope.txt}""#).unwrap();

        let errors = process_references(&mut config, temp.path()).unwrap_err();
        assert!(matches!(errors[0], ConfigError::ReferenceNotFound(_)));
    }
}
