use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages, including every workflow step
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "qry")]
#[command(about = "qry - ask questions of a SQL database in plain language")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (off, error, warn, info, debug, trace)
    /// If not specified, uses RUST_LOG, then the config file value
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (defaults to ~/.config/quarry/config.toml)
    #[arg(short = 'C', long, global = true, env = "QUARRY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Database file (overrides config file)
    #[arg(long, global = true, env = "QUARRY_DB")]
    pub db: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer one question and exit
    Ask {
        /// The question, in plain language
        question: String,

        /// Also print the execution history and trace messages
        #[arg(long)]
        history: bool,

        /// Print the whole session as JSON
        #[arg(long, conflicts_with = "history")]
        json: bool,
    },

    /// Interactive question loop with conversation memory ('q' quits)
    Chat,

    /// Print the schema description used in prompts
    Schema,

    /// Serve the HTTP endpoint
    Serve {
        /// Bind address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Bind port (overrides config file)
        #[arg(short, long)]
        port: Option<u16>,
    },
}
