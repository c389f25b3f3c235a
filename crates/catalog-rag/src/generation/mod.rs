//! Grounding-context assembly and the Ollama completion client

pub mod context;
pub mod ollama;

pub use context::{assemble, grounded_user_message};
pub use ollama::OllamaClient;
