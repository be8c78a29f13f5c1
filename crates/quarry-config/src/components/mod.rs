//! Configuration sections

pub mod chat;
pub mod database;
pub mod llm;
pub mod logging;
pub mod recovery;
pub mod web;
pub mod workflow;

pub use chat::ChatConfig;
pub use database::DatabaseConfig;
pub use llm::{LlmConfig, LlmProviderType};
pub use logging::LoggingConfig;
pub use recovery::{RecoveryConfig, ValueColumn};
pub use web::WebConfig;
pub use workflow::WorkflowConfig;
