//! Error types for the RAG engine

use thiserror::Error;

/// Result type alias for RAG operations
pub type Result<T> = std::result::Result<T, Error>;

/// RAG engine errors
///
/// Provider failures during a live turn (`Retrieval`, `Generation`) are
/// recoverable per-turn; `IndexBuild`, `CorpusDesync` and
/// `DimensionMismatch` are fatal to the process.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog load or validation error
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Embedding provider call failed
    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    /// Embedding failure while building the similarity index; no partial
    /// index is exposed
    #[error("Index build failed: {0}")]
    IndexBuild(String),

    /// Embedding failure during a live query; the turn is aborted without
    /// touching conversation history
    #[error("Retrieval failed: {0}")]
    Retrieval(String),

    /// Chat provider failed or returned malformed output
    #[error("Generation failed: {0}")]
    Generation(String),

    /// The similarity index returned an id absent from the catalog
    #[error("Similarity index returned unknown product id {id}")]
    CorpusDesync { id: u64 },

    /// Embedding dimension differs from the index dimension
    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A turn was submitted to a closed session
    #[error("Session is closed")]
    SessionClosed,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a catalog error
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog(message.into())
    }

    /// Create an embedding error
    pub fn embedding(message: impl Into<String>) -> Self {
        Self::Embedding(message.into())
    }

    /// Create a generation error
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation(message.into())
    }

    /// Whether this error should abort the process rather than the turn
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::IndexBuild(_) | Self::CorpusDesync { .. } | Self::DimensionMismatch { .. }
        )
    }
}
