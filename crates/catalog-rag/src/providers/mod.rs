//! Provider abstractions for embeddings and chat completion
//!
//! Trait-based seams so the engine can run against a local Ollama server or
//! a deterministic mock without touching the retrieval or session code.

pub mod chat;
pub mod embedding;
pub mod mock;
pub mod ollama;

pub use chat::ChatProvider;
pub use embedding::EmbeddingProvider;
pub use ollama::{OllamaChat, OllamaEmbedder, OllamaProvider};
