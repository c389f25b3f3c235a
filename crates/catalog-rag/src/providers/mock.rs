//! Mock providers for testing without a running model server.
//!
//! Embeddings are deterministic: the same text always yields the same
//! vector, so index builds are reproducible in tests.

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::types::Message;

use super::chat::ChatProvider;
use super::embedding::EmbeddingProvider;

/// Mock embedder that generates deterministic vectors.
///
/// Specific texts can be pinned to hand-picked vectors with [`with_vector`];
/// anything else falls back to a hash-derived vector. Matching is by
/// case-insensitive substring, first pin wins.
///
/// [`with_vector`]: MockEmbedder::with_vector
pub struct MockEmbedder {
    dimensions: usize,
    pinned: Vec<(String, Vec<f32>)>,
    fail_on: Option<String>,
}

impl MockEmbedder {
    /// Create a new mock embedder
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            pinned: Vec::new(),
            fail_on: None,
        }
    }

    /// Pin texts containing `fragment` to a fixed vector
    pub fn with_vector(mut self, fragment: impl Into<String>, vector: Vec<f32>) -> Self {
        self.pinned.push((fragment.into().to_lowercase(), vector));
        self
    }

    /// Fail any embed call whose text contains `fragment`
    pub fn fail_on(mut self, fragment: impl Into<String>) -> Self {
        self.fail_on = Some(fragment.into().to_lowercase());
        self
    }

    fn hash_vector(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];
        for (i, byte) in text.bytes().enumerate() {
            let slot = (i.wrapping_mul(31).wrapping_add(byte as usize)) % self.dimensions;
            vector[slot] += (byte % 13) as f32 + 1.0;
        }
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }
        vector
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let lower = text.to_lowercase();

        if let Some(fragment) = &self.fail_on {
            if lower.contains(fragment) {
                return Err(Error::embedding(format!(
                    "mock failure for text containing '{}'",
                    fragment
                )));
            }
        }

        for (fragment, vector) in &self.pinned {
            if lower.contains(fragment) {
                return Ok(vector.clone());
            }
        }

        Ok(self.hash_vector(&lower))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Mock chat provider returning a canned reply
pub struct MockChat {
    reply: String,
    fail: bool,
}

impl MockChat {
    /// Create a mock that always replies with `reply`
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            fail: false,
        }
    }

    /// Create a mock that fails every completion
    pub fn failing() -> Self {
        Self {
            reply: String::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl ChatProvider for MockChat {
    async fn complete(
        &self,
        messages: &[Message],
        _temperature: f32,
        _max_tokens: u32,
    ) -> Result<Message> {
        if self.fail {
            return Err(Error::generation("mock chat failure"));
        }
        if messages.is_empty() {
            return Err(Error::generation("empty conversation"));
        }
        Ok(Message::assistant(self.reply.clone()))
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock"
    }
}
