//! Chat provider trait for generating the next assistant message

use async_trait::async_trait;

use crate::error::Result;
use crate::types::Message;

/// Trait for chat completion over an ordered message sequence
///
/// Implementations:
/// - `OllamaChat`: local Ollama server (`/api/chat`)
/// - `MockChat`: canned offline replies for tests
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Generate the next assistant message for the given conversation.
    ///
    /// The returned message always carries the assistant role; a provider
    /// that replies with anything else is treated as malformed output.
    async fn complete(
        &self,
        messages: &[Message],
        temperature: f32,
        max_tokens: u32,
    ) -> Result<Message>;

    /// Check if the provider is healthy and available
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model identifier used for completions
    fn model(&self) -> &str;
}
