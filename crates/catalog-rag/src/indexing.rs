//! One-shot index build over the catalog
//!
//! The build is atomic: if embedding any document fails, the whole build
//! fails and no partial index is handed to the retriever.

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::providers::EmbeddingProvider;
use crate::retrieval::SimilarityIndex;

/// Embed every catalog record and build the similarity index.
///
/// Renders each product to its document text (fixed field order), embeds
/// the whole batch in one provider call, and inserts exactly one entry per
/// record. Must complete before the chat loop accepts its first query.
pub async fn build_index(
    catalog: &Catalog,
    embedder: &dyn EmbeddingProvider,
) -> Result<SimilarityIndex> {
    let documents: Vec<_> = catalog.iter().map(|p| p.to_document()).collect();
    let texts: Vec<String> = documents.iter().map(|d| d.text.clone()).collect();

    tracing::info!(
        "Building similarity index over {} products ({} dims, provider: {})",
        documents.len(),
        embedder.dimensions(),
        embedder.name()
    );

    let embeddings = embedder
        .embed_batch(&texts)
        .await
        .map_err(|e| Error::IndexBuild(e.to_string()))?;

    if embeddings.len() != documents.len() {
        return Err(Error::IndexBuild(format!(
            "provider returned {} embeddings for {} documents",
            embeddings.len(),
            documents.len()
        )));
    }

    let mut index = SimilarityIndex::new(embedder.dimensions());
    for (document, embedding) in documents.iter().zip(embeddings) {
        index.insert(document.product_id, embedding)?;
    }

    tracing::info!("Similarity index ready: {} entries", index.len());

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mock::MockEmbedder;
    use crate::types::Product;

    fn catalog() -> Catalog {
        Catalog::from_products(vec![
            Product {
                id: 1,
                name: "Mug".to_string(),
                description: "Ceramic mug".to_string(),
                price: 10.0,
            },
            Product {
                id: 2,
                name: "Pen".to_string(),
                description: "Blue ink pen".to_string(),
                price: 2.0,
            },
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn test_one_entry_per_record() {
        let index = build_index(&catalog(), &MockEmbedder::new(8)).await.unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index.dimensions(), 8);
    }

    #[tokio::test]
    async fn test_build_is_deterministic() {
        let embedder = MockEmbedder::new(8);
        let catalog = catalog();

        let a = build_index(&catalog, &embedder).await.unwrap();
        let b = build_index(&catalog, &embedder).await.unwrap();

        // Same provider, same corpus: identical neighbor ranking
        let probe = embedder.embed("ceramic").await.unwrap();
        assert_eq!(a.query(&probe, 2).unwrap(), b.query(&probe, 2).unwrap());
    }

    #[tokio::test]
    async fn test_any_embed_failure_fails_whole_build() {
        let embedder = MockEmbedder::new(8).fail_on("pen");

        let result = build_index(&catalog(), &embedder).await;

        assert!(matches!(result, Err(Error::IndexBuild(_))));
    }

    #[tokio::test]
    async fn test_empty_catalog_builds_empty_index() {
        let catalog = Catalog::from_products(Vec::new()).unwrap();

        let index = build_index(&catalog, &MockEmbedder::new(8)).await.unwrap();

        assert!(index.is_empty());
    }
}
