//! Query-time retrieval: embed the query, rank the catalog

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::providers::EmbeddingProvider;
use crate::types::Product;

use super::index::SimilarityIndex;

/// A retrieved product with its similarity rank score.
///
/// Borrows the product from the catalog; retrieval never copies records.
#[derive(Debug)]
pub struct ScoredProduct<'a> {
    /// The retrieved catalog record
    pub product: &'a Product,
    /// Cosine distance to the query (lower is closer)
    pub distance: f32,
}

/// Retriever over a built similarity index and its source catalog
pub struct Retriever {
    catalog: Arc<Catalog>,
    index: Arc<SimilarityIndex>,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl Retriever {
    /// Create a retriever. The index must have been built from this catalog.
    pub fn new(
        catalog: Arc<Catalog>,
        index: Arc<SimilarityIndex>,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Self {
        Self {
            catalog,
            index,
            embedder,
        }
    }

    /// Retrieve the top-k products for a query, in similarity rank order.
    ///
    /// An empty result means no matches were possible (k = 0 or empty
    /// corpus); a provider failure surfaces as [`Error::Retrieval`] instead
    /// of an empty result. An index id missing from the catalog is
    /// [`Error::CorpusDesync`], never silently dropped.
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<ScoredProduct<'_>>> {
        if k == 0 || self.index.is_empty() {
            return Ok(Vec::new());
        }

        let embedding = self
            .embedder
            .embed(query)
            .await
            .map_err(|e| Error::Retrieval(e.to_string()))?;

        let neighbors = self.index.query(&embedding, k)?;

        tracing::debug!("Query matched {} of {} products", neighbors.len(), self.index.len());

        neighbors
            .into_iter()
            .map(|neighbor| {
                let product = self
                    .catalog
                    .get(neighbor.id)
                    .ok_or(Error::CorpusDesync { id: neighbor.id })?;
                Ok(ScoredProduct {
                    product,
                    distance: neighbor.distance,
                })
            })
            .collect()
    }

    /// The catalog this retriever resolves ids against
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
