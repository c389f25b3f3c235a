//! Semantic retrieval: similarity index and query-time search

pub mod index;
pub mod search;

pub use index::{Neighbor, SimilarityIndex};
pub use search::{Retriever, ScoredProduct};
