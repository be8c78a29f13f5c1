//! OpenAI chat gateway

use super::http::{endpoint, status_error, transport_error};
use async_trait::async_trait;
use quarry_core::{LlmError, LlmResult, TextGenerator};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// OpenAI-compatible `/chat/completions` gateway
pub struct OpenAiGenerator {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl OpenAiGenerator {
    /// Create a new OpenAI gateway
    pub fn new(api_key: String, base_url: Option<String>, model: String, timeout_secs: u64) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            model,
            timeout: Duration::from_secs(timeout_secs),
            temperature: 0.0,
            max_tokens: None,
        }
    }

    /// Set sampling options
    pub fn with_options(mut self, temperature: f32, max_tokens: Option<u32>) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate_text(
        &self,
        system_instruction: &str,
        user_message: &str,
    ) -> LlmResult<String> {
        let mut api_request = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_instruction },
                { "role": "user", "content": user_message },
            ],
            "temperature": self.temperature,
        });

        if let Some(max_tokens) = self.max_tokens {
            api_request["max_tokens"] = serde_json::json!(max_tokens);
        }

        let url = endpoint(&self.base_url, "chat/completions");
        debug!(url = %url, model = %self.model, "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&api_request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| transport_error(e, self.timeout))?;

        if !response.status().is_success() {
            return Err(status_error("OpenAI", response).await);
        }

        let openai_response: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        if let Some(usage) = &openai_response.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Chat completion usage"
            );
        }

        openai_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("No content in response".to_string()))
    }

    fn provider_name(&self) -> &str {
        "OpenAI"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

// OpenAI API response types
#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_generator_creation() {
        let generator =
            OpenAiGenerator::new("sk-test-key".to_string(), None, "gpt-4o-mini".to_string(), 60);

        assert_eq!(generator.provider_name(), "OpenAI");
        assert_eq!(generator.model_name(), "gpt-4o-mini");
        assert_eq!(generator.base_url, "https://api.openai.com/v1");
        assert_eq!(generator.timeout, Duration::from_secs(60));
    }
}
