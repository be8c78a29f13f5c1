//! # Quarry LLM
//!
//! Language model gateways for the Quarry workflow.
//!
//! ## Providers
//!
//! - [`OpenAiGenerator`]: any OpenAI-compatible `/chat/completions` endpoint
//! - [`OllamaGenerator`]: a local Ollama server (`/api/chat`)
//!
//! Both implement [`quarry_core::TextGenerator`]: one system instruction and
//! one user message in, the assistant's text out.
//!
//! ## Example
//!
//! ```rust,no_run
//! use quarry_config::LlmConfig;
//! use quarry_llm::create_text_generator;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let generator = create_text_generator(&LlmConfig::default())?;
//! let sql = generator
//!     .generate_text("Return only SQL.", "How many films are there?")
//!     .await?;
//! println!("{sql}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chat;

pub use chat::{create_text_generator, OllamaGenerator, OpenAiGenerator};
