//! # Quarry Configuration
//!
//! Type-safe configuration for the Quarry text-to-SQL workflow.
//!
//! ## Features
//!
//! - TOML files with per-section defaults
//! - `{env:VAR}` and `{file:path}` references resolved at load time
//! - Provider-aware defaults for the language model gateway
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use quarry_config::ConfigLoader;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigLoader::load_from_file("quarry.toml")?;
//!     println!("database: {:?}", config.database.path);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod components;
mod config;
mod error;
mod references;
mod loader;

pub use components::*;
pub use config::QuarryConfig;
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use references::process_references;
