//! Language model gateway abstraction

use async_trait::async_trait;
use thiserror::Error;

/// Errors from a text-generation backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    /// Transport-level failure
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Request exceeded its deadline
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// Backend refused the request because of quota or rate limits
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Reply was missing or malformed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Gateway is misconfigured (missing key, bad endpoint)
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for gateway calls
pub type LlmResult<T> = Result<T, LlmError>;

/// Opaque text generation: system instruction plus user message in, text out
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a reply for one system/user message pair
    async fn generate_text(&self, system_instruction: &str, user_message: &str)
        -> LlmResult<String>;

    /// Backend name for logs
    fn provider_name(&self) -> &str;

    /// Model the backend talks to
    fn model_name(&self) -> &str;
}
