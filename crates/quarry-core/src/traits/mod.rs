//! Collaborator abstractions
//!
//! The workflow engine depends only on these traits. Concrete gateways,
//! executors, and recoverers live in their own crates and are injected when
//! the workflow is built.

pub mod database;
pub mod llm;
pub mod recovery;
pub mod schema;

pub use database::{DbError, DbResult, QueryExecutor};
pub use llm::{LlmError, LlmResult, TextGenerator};
pub use recovery::{RecoveredQuery, RecoveryError, RecoveryResult, ValueRecoverer, ValueSuggestion};
pub use schema::{SchemaProvider, StaticSchema};
