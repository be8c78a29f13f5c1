//! Ollama chat gateway

use super::http::{endpoint, status_error, transport_error};
use async_trait::async_trait;
use quarry_core::{LlmError, LlmResult, TextGenerator};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Local Ollama `/api/chat` gateway (non-streaming)
pub struct OllamaGenerator {
    client: reqwest::Client,
    base_url: String,
    model: String,
    timeout: Duration,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl OllamaGenerator {
    /// Create a new Ollama gateway
    pub fn new(base_url: String, model: String, timeout_secs: u64) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
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
impl TextGenerator for OllamaGenerator {
    async fn generate_text(
        &self,
        system_instruction: &str,
        user_message: &str,
    ) -> LlmResult<String> {
        let mut options = serde_json::json!({ "temperature": self.temperature });
        if let Some(max_tokens) = self.max_tokens {
            options["num_predict"] = serde_json::json!(max_tokens);
        }

        let api_request = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_instruction },
                { "role": "user", "content": user_message },
            ],
            "stream": false,
            "options": options,
        });

        let url = endpoint(&self.base_url, "api/chat");
        debug!(url = %url, model = %self.model, "Sending Ollama chat request");

        let response = self
            .client
            .post(&url)
            .json(&api_request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| transport_error(e, self.timeout))?;

        if !response.status().is_success() {
            return Err(status_error("Ollama", response).await);
        }

        let ollama_response: OllamaResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        Ok(ollama_response.message.content)
    }

    fn provider_name(&self) -> &str {
        "Ollama"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    message: OllamaMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    content: String,
}
