//! In-memory similarity index over product embeddings
//!
//! Distance metric is cosine distance (1 - cosine similarity), matching the
//! comparison semantics of the embedding models this engine targets. The
//! metric is fixed: the same function scores both build and query vectors.
//!
//! Lookup is a naive O(n*d) scan, which is fine for catalogs that fit in
//! memory. The index is built fully before the first query and never
//! mutated afterwards, so queries need no locking.

use std::collections::HashSet;

use crate::error::{Error, Result};

/// One nearest-neighbor match
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    /// Product id of the matched entry
    pub id: u64,
    /// Cosine distance to the query vector (lower is closer)
    pub distance: f32,
}

struct Entry {
    id: u64,
    embedding: Vec<f32>,
}

/// Fixed-dimension similarity index, read-only after build
pub struct SimilarityIndex {
    dimensions: usize,
    entries: Vec<Entry>,
    ids: HashSet<u64>,
}

impl SimilarityIndex {
    /// Create an empty index for embeddings of the given dimension
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            entries: Vec::new(),
            ids: HashSet::new(),
        }
    }

    /// Insert an (id, embedding) pair.
    ///
    /// Rejects embeddings of the wrong dimension and duplicate ids; the
    /// catalog already guarantees unique ids, so a duplicate here is a
    /// build bug, not user input.
    pub fn insert(&mut self, id: u64, embedding: Vec<f32>) -> Result<()> {
        if embedding.len() != self.dimensions {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions,
                actual: embedding.len(),
            });
        }
        if !self.ids.insert(id) {
            return Err(Error::IndexBuild(format!("duplicate index entry for id {}", id)));
        }
        self.entries.push(Entry { id, embedding });
        Ok(())
    }

    /// Return up to `min(k, len)` entry ids, ascending by cosine distance
    /// to `vector`. Equal distances resolve by insertion order.
    pub fn query(&self, vector: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        if vector.len() != self.dimensions {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions,
                actual: vector.len(),
            });
        }

        let mut neighbors: Vec<Neighbor> = self
            .entries
            .iter()
            .map(|entry| Neighbor {
                id: entry.id,
                distance: cosine_distance(vector, &entry.embedding),
            })
            .collect();

        // Stable sort keeps insertion order for equal distances
        neighbors.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        neighbors.truncate(k);

        Ok(neighbors)
    }

    /// Number of indexed entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Embedding dimension this index was built for
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    1.0 - cosine_similarity(a, b)
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(vectors: &[(u64, Vec<f32>)]) -> SimilarityIndex {
        let mut index = SimilarityIndex::new(vectors[0].1.len());
        for (id, v) in vectors {
            index.insert(*id, v.clone()).unwrap();
        }
        index
    }

    #[test]
    fn test_query_orders_by_distance() {
        let index = index_of(&[
            (1, vec![1.0, 0.0]),
            (2, vec![0.0, 1.0]),
            (3, vec![0.7, 0.7]),
        ]);

        let neighbors = index.query(&[1.0, 0.0], 3).unwrap();
        let ids: Vec<u64> = neighbors.iter().map(|n| n.id).collect();

        assert_eq!(ids, vec![1, 3, 2]);
        assert!(neighbors.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn test_query_returns_min_k_n() {
        let index = index_of(&[(1, vec![1.0, 0.0])]);

        // k=3 against a corpus of 1 returns exactly 1 result, not an error
        assert_eq!(index.query(&[1.0, 0.0], 3).unwrap().len(), 1);
        assert_eq!(index.query(&[1.0, 0.0], 0).unwrap().len(), 0);
    }

    #[test]
    fn test_equal_distances_break_ties_by_insertion_order() {
        let index = index_of(&[
            (7, vec![1.0, 0.0]),
            (5, vec![1.0, 0.0]),
            (9, vec![1.0, 0.0]),
        ]);

        let ids: Vec<u64> = index
            .query(&[1.0, 0.0], 3)
            .unwrap()
            .iter()
            .map(|n| n.id)
            .collect();

        assert_eq!(ids, vec![7, 5, 9]);
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let mut index = SimilarityIndex::new(2);

        assert!(matches!(
            index.insert(1, vec![1.0, 0.0, 0.0]),
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));

        index.insert(1, vec![1.0, 0.0]).unwrap();
        assert!(matches!(
            index.query(&[1.0], 1),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut index = SimilarityIndex::new(2);
        index.insert(1, vec![1.0, 0.0]).unwrap();

        assert!(matches!(
            index.insert(1, vec![0.0, 1.0]),
            Err(Error::IndexBuild(_))
        ));
    }

    #[test]
    fn test_empty_index_yields_no_neighbors() {
        let index = SimilarityIndex::new(2);
        assert!(index.query(&[1.0, 0.0], 3).unwrap().is_empty());
    }

    #[test]
    fn test_zero_vector_scores_last_not_nan() {
        let index = index_of(&[(1, vec![0.0, 0.0]), (2, vec![1.0, 0.0])]);

        let neighbors = index.query(&[1.0, 0.0], 2).unwrap();

        assert_eq!(neighbors[0].id, 2);
        assert!(neighbors.iter().all(|n| !n.distance.is_nan()));
    }
}
