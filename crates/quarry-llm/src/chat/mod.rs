//! Chat gateway implementations

mod http;
pub mod ollama;
pub mod openai;

pub use ollama::OllamaGenerator;
pub use openai::OpenAiGenerator;

use quarry_config::{LlmConfig, LlmProviderType};
use quarry_core::{LlmError, LlmResult, TextGenerator};
use std::sync::Arc;

/// Create a text generator from configuration
pub fn create_text_generator(config: &LlmConfig) -> LlmResult<Arc<dyn TextGenerator>> {
    match config.provider {
        LlmProviderType::Ollama => {
            let generator =
                OllamaGenerator::new(config.endpoint(), config.model(), config.timeout_secs())
                    .with_options(config.temperature(), config.max_tokens);
            Ok(Arc::new(generator))
        }
        LlmProviderType::OpenAI => {
            let api_key = config.resolved_api_key().ok_or_else(|| {
                LlmError::ConfigError(
                    "no API key: set llm.api_key or OPENAI_API_KEY".to_string(),
                )
            })?;

            let generator = OpenAiGenerator::new(
                api_key,
                config.endpoint.clone(),
                config.model(),
                config.timeout_secs(),
            )
            .with_options(config.temperature(), config.max_tokens);
            Ok(Arc::new(generator))
        }
    }
}
