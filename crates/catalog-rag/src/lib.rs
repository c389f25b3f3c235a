//! catalog-rag: retrieval-augmented product chatbot engine
//!
//! Builds a semantic similarity index over a static product catalog,
//! retrieves the records closest in meaning to each user query, and grounds
//! a multi-turn chat session on them. Embeddings and chat completion are
//! consumed through provider traits with a local Ollama implementation and
//! deterministic mocks for offline tests.

pub mod catalog;
pub mod config;
pub mod error;
pub mod generation;
pub mod indexing;
pub mod providers;
pub mod retrieval;
pub mod session;
pub mod types;

pub use catalog::Catalog;
pub use config::RagConfig;
pub use error::{Error, Result};
pub use indexing::build_index;
pub use retrieval::{Retriever, ScoredProduct, SimilarityIndex};
pub use session::{ChatSession, SessionState, TurnOutcome};
pub use types::{Message, Product, Role};
