//! Config file discovery and loading

use crate::config::QuarryConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::references::{process_references, resolve_path};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Loads [`QuarryConfig`] from disk
pub struct ConfigLoader;

impl ConfigLoader {
    /// Default config location: `~/.config/quarry/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("quarry").join("config.toml"))
    }

    /// Load an explicit file, or the default file if it exists, or defaults
    pub fn load(path: Option<&Path>) -> ConfigResult<QuarryConfig> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => match Self::default_path() {
                Some(default) if default.exists() => Self::load_from_file(default),
                _ => {
                    debug!("No config file found, using defaults");
                    Ok(QuarryConfig::default())
                }
            },
        }
    }

    /// Load and validate a TOML config file
    pub fn load_from_file(path: impl AsRef<Path>) -> ConfigResult<QuarryConfig> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading configuration");

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::load_from_str(&content, base_dir).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse a TOML document, resolving references relative to `base_dir`
    pub fn load_from_str(content: &str, base_dir: &Path) -> ConfigResult<QuarryConfig> {
        let parse_error = |error: String| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            error,
        };

        let mut value: toml::Value =
            toml::from_str(content).map_err(|e| parse_error(e.to_string()))?;

        // Only the first broken reference is reported as the error value;
        // the rest were already logged while walking the tree.
        if let Err(mut errors) = process_references(&mut value, base_dir) {
            return Err(errors.remove(0));
        }

        let mut config = value
            .try_into::<QuarryConfig>()
            .map_err(|e| parse_error(e.to_string()))?;

        if let Some(db_path) = config.database.path.take() {
            let expanded = resolve_path(&db_path.to_string_lossy(), base_dir);
            config.database.path = Some(expanded);
        }

        config.validate()?;
        Ok(config)
    }
}
