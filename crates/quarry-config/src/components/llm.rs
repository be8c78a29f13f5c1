//! Language model gateway configuration

use serde::{Deserialize, Serialize};

/// Default chat model per provider
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
/// Default Ollama model
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";
/// Default request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Supported text-generation backends
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LlmProviderType {
    /// OpenAI-compatible `/chat/completions` API
    #[default]
    OpenAI,
    /// Local Ollama server
    Ollama,
}

impl LlmProviderType {
    /// Provider name for display and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::Ollama => "ollama",
        }
    }
}

/// Gateway settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LlmConfig {
    /// Which backend to talk to
    #[serde(default)]
    pub provider: LlmProviderType,
    /// Model name (provider default when unset)
    pub model: Option<String>,
    /// Endpoint URL (provider default when unset)
    pub endpoint: Option<String>,
    /// API key; OpenAI falls back to `OPENAI_API_KEY`
    pub api_key: Option<String>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Maximum tokens per reply
    pub max_tokens: Option<u32>,
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProviderType::OpenAI,
            model: None,
            endpoint: None,
            api_key: None,
            temperature: None,
            max_tokens: None,
            timeout_secs: None,
        }
    }
}

impl LlmConfig {
    /// Get the endpoint, using the provider default if not specified
    pub fn endpoint(&self) -> String {
        self.endpoint.clone().unwrap_or_else(|| match self.provider {
            LlmProviderType::OpenAI => "https://api.openai.com/v1".to_string(),
            LlmProviderType::Ollama => "http://localhost:11434".to_string(),
        })
    }

    /// Get the model, using the provider default if not specified
    pub fn model(&self) -> String {
        self.model.clone().unwrap_or_else(|| match self.provider {
            LlmProviderType::OpenAI => DEFAULT_OPENAI_MODEL.to_string(),
            LlmProviderType::Ollama => DEFAULT_OLLAMA_MODEL.to_string(),
        })
    }

    /// Temperature, deterministic by default
    pub fn temperature(&self) -> f32 {
        self.temperature.unwrap_or(0.0)
    }

    /// Timeout in seconds
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    /// API key from config, then from the provider's conventional env var
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key.clone().or_else(|| match self.provider {
            LlmProviderType::OpenAI => std::env::var("OPENAI_API_KEY").ok(),
            LlmProviderType::Ollama => None,
        })
    }
}
