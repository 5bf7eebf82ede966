//! Exact in-memory vector index
//!
//! Vectors live in one flat row-major buffer; row `i` belongs to
//! `documents[i]`. Both grow together or not at all.

use std::collections::BTreeSet;

use crate::domain::errors::{RagError, RagResult};
use crate::domain::models::{Chunk, IndexStats, SearchResult};

/// Append-only brute-force nearest-neighbor index over squared L2 distance.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    dim: usize,
    vectors: Vec<f32>,
    documents: Vec<Chunk>,
}

impl VectorIndex {
    /// Empty index for vectors of length `dim`
    pub const fn new(dim: usize) -> Self {
        Self {
            dim,
            vectors: Vec::new(),
            documents: Vec::new(),
        }
    }

    /// Vector length this index accepts
    pub const fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored (vector, chunk) pairs
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True when nothing has been added
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Stored chunks in insertion order
    pub fn documents(&self) -> &[Chunk] {
        &self.documents
    }

    /// Number of stored vectors. Always equal to [`Self::len`].
    pub fn vector_count(&self) -> usize {
        if self.dim == 0 {
            self.documents.len()
        } else {
            self.vectors.len() / self.dim
        }
    }

    /// Reject vectors whose length differs from [`Self::dim`]
    pub fn check_dimension(&self, vector: &[f32]) -> RagResult<()> {
        if vector.len() == self.dim {
            Ok(())
        } else {
            Err(RagError::DimensionMismatch {
                expected: self.dim,
                actual: vector.len(),
            })
        }
    }

    /// Append one vector and its chunk. Nothing is stored on error.
    pub fn add(&mut self, vector: &[f32], chunk: Chunk) -> RagResult<()> {
        self.check_dimension(vector)?;
        self.vectors.extend_from_slice(vector);
        self.documents.push(chunk);
        Ok(())
    }

    /// Append a batch, validating every vector before storing any.
    pub fn add_all(&mut self, entries: Vec<(Vec<f32>, Chunk)>) -> RagResult<usize> {
        for (vector, _) in &entries {
            self.check_dimension(vector)?;
        }

        let added = entries.len();
        self.vectors.reserve(added * self.dim);
        self.documents.reserve(added);
        for (vector, chunk) in entries {
            self.vectors.extend_from_slice(&vector);
            self.documents.push(chunk);
        }
        Ok(added)
    }

    /// Up to `top_k` nearest chunks, closest first. Ties keep insertion
    /// order. An empty index yields no results rather than an error.
    pub fn search(&self, query: &[f32], top_k: usize) -> RagResult<Vec<SearchResult>> {
        self.check_dimension(query)?;
        if top_k == 0 || self.is_empty() {
            return Ok(Vec::new());
        }

        let mut scored: Vec<(usize, f32)> = self
            .rows()
            .enumerate()
            .map(|(i, row)| (i, squared_l2(query, row)))
            .collect();
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));
        scored.truncate(top_k);

        Ok(scored
            .into_iter()
            .map(|(i, distance)| SearchResult::from_chunk(&self.documents[i], distance))
            .collect())
    }

    /// Chunk count plus the sorted distinct source filenames
    pub fn stats(&self) -> IndexStats {
        let files: BTreeSet<&str> = self
            .documents
            .iter()
            .filter_map(|c| c.metadata.filename.as_deref())
            .collect();

        IndexStats {
            total_chunks: self.documents.len(),
            total_files: files.len(),
            files: files.into_iter().map(str::to_string).collect(),
        }
    }

    fn rows(&self) -> impl Iterator<Item = &[f32]> + '_ {
        (0..self.documents.len()).map(move |i| &self.vectors[i * self.dim..(i + 1) * self.dim])
    }
}

/// Squared Euclidean distance
pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ChunkMetadata;

    fn chunk(text: &str, file: &str) -> Chunk {
        Chunk::new(
            text,
            ChunkMetadata {
                filename: Some(file.to_string()),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_empty_index_search() {
        let index = VectorIndex::new(3);
        assert!(index.is_empty());
        assert!(index.search(&[0.0, 0.0, 0.0], 4).unwrap().is_empty());
    }

    #[test]
    fn test_add_rejects_wrong_dimension() {
        let mut index = VectorIndex::new(3);
        let err = index.add(&[1.0, 2.0], chunk("a", "a.txt")).unwrap_err();

        assert!(matches!(
            err,
            RagError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        ));
        assert_eq!(index.len(), 0);
        assert_eq!(index.vector_count(), 0);
    }

    #[test]
    fn test_search_orders_by_distance() {
        let mut index = VectorIndex::new(2);
        index.add(&[10.0, 0.0], chunk("far", "a.txt")).unwrap();
        index.add(&[1.0, 0.0], chunk("near", "a.txt")).unwrap();
        index.add(&[3.0, 4.0], chunk("mid", "b.txt")).unwrap();

        let results = index.search(&[0.0, 0.0], 2).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].text, "near");
        assert!((results[0].distance - 1.0).abs() < f32::EPSILON);
        assert_eq!(results[1].text, "mid");
        assert!((results[1].distance - 25.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_search_returns_all_when_fewer_than_k() {
        let mut index = VectorIndex::new(1);
        index.add(&[1.0], chunk("one", "a.txt")).unwrap();
        index.add(&[2.0], chunk("two", "a.txt")).unwrap();

        assert_eq!(index.search(&[0.0], 10).unwrap().len(), 2);
        assert!(index.search(&[0.0], 0).unwrap().is_empty());
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut index = VectorIndex::new(1);
        index.add(&[1.0], chunk("first", "a.txt")).unwrap();
        index.add(&[-1.0], chunk("second", "a.txt")).unwrap();

        let results = index.search(&[0.0], 2).unwrap();
        assert_eq!(results[0].text, "first");
        assert_eq!(results[1].text, "second");
    }

    #[test]
    fn test_add_all_is_all_or_nothing() {
        let mut index = VectorIndex::new(2);
        let batch = vec![
            (vec![1.0, 1.0], chunk("ok", "a.txt")),
            (vec![1.0], chunk("bad", "a.txt")),
        ];

        assert!(index.add_all(batch).is_err());
        assert!(index.is_empty());

        let batch = vec![
            (vec![1.0, 1.0], chunk("x", "a.txt")),
            (vec![2.0, 2.0], chunk("y", "a.txt")),
        ];
        assert_eq!(index.add_all(batch).unwrap(), 2);
        assert_eq!(index.vector_count(), index.len());
    }

    #[test]
    fn test_stats_distinct_sorted_files() {
        let mut index = VectorIndex::new(1);
        index.add(&[0.0], chunk("1", "policies.txt")).unwrap();
        index.add(&[0.0], chunk("2", "about.txt")).unwrap();
        index.add(&[0.0], chunk("3", "policies.txt")).unwrap();

        let stats = index.stats();
        assert_eq!(stats.total_chunks, 3);
        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.files, vec!["about.txt", "policies.txt"]);
    }

    #[test]
    fn test_query_dimension_checked() {
        let index = VectorIndex::new(3);
        assert!(index.search(&[1.0], 1).is_err());
    }
}
