//! Tracing subscriber setup

use crate::cli::{Cli, LogLevel};
use quarry_config::LoggingConfig;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

const QUARRY_CRATES: &[&str] = &[
    "quarry_core",
    "quarry_config",
    "quarry_llm",
    "quarry_sqlite",
    "quarry_web",
    "quarry_cli",
    "qry",
    "tower_http",
];

/// Filter directives for our crates at `level`; everything else stays at warn
pub fn filter_directives(level: &str) -> String {
    let mut directives = vec!["warn".to_string()];
    directives.extend(QUARRY_CRATES.iter().map(|name| format!("{}={}", name, level)));
    directives.join(",")
}

/// Build the filter: explicit flags, then `RUST_LOG`, then the config file
pub fn env_filter(cli: &Cli, config: &LoggingConfig) -> EnvFilter {
    let explicit = if cli.verbose {
        Some(LogLevel::Debug)
    } else {
        cli.log_level
    };

    if let Some(level) = explicit {
        let level = LevelFilter::from(level).to_string().to_lowercase();
        return EnvFilter::new(filter_directives(&level));
    }

    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(&config.level)))
}

/// Install the global subscriber, writing to stderr
pub fn init(cli: &Cli, config: &LoggingConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(cli, config))
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directives() {
        let directives = filter_directives("debug");
        assert!(directives.starts_with("warn,"));
        assert!(directives.contains("quarry_core=debug"));
        assert!(directives.contains("tower_http=debug"));
    }
}
