//! LLM provider trait for generating answers

use async_trait::async_trait;

use crate::error::Result;

/// Trait for prompt completion
///
/// Model name and temperature are fixed by each implementation's
/// configuration.
///
/// Implementations:
/// - `GeminiLlm`: Google Generative Language API (gemini-2.0-flash)
/// - `OllamaLlm`: Local Ollama server (phi3, llama3, etc.)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Complete a prompt, returning the generated text
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Check if the provider is reachable
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model in use
    fn model(&self) -> &str;
}
