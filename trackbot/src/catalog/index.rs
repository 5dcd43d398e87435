//! Flat inner-product vector index
//!
//! Brute-force nearest-neighbor search over unit-normalized vectors.
//! All stored vectors are unit length, so dot product equals cosine
//! similarity.

use crate::error::{Error, Result};

/// Append-only nearest-neighbor index over fixed-dimension unit vectors.
///
/// Positions are zero-based insertion order. Rebuilding replaces the
/// index wholesale; the catalog is never updated incrementally.
#[derive(Debug, Clone, Default)]
pub struct VectorIndex {
    dim: usize,
    vectors: Vec<Vec<f32>>,
}

impl VectorIndex {
    /// Build an index over the given vectors in their given order.
    ///
    /// Mismatched dimensions are a fatal configuration error: indexes
    /// are only built at startup, from one embedder's output.
    pub fn build(vectors: Vec<Vec<f32>>) -> Result<Self> {
        let dim = vectors.first().map(|v| v.len()).unwrap_or(0);
        for (position, vector) in vectors.iter().enumerate() {
            if vector.len() != dim {
                return Err(Error::Config(format!(
                    "Vector dimension mismatch at position {}: expected {}, got {}",
                    position,
                    dim,
                    vector.len()
                )));
            }
        }
        Ok(VectorIndex { dim, vectors })
    }

    /// Number of indexed vectors.
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Top-k search by descending dot product.
    ///
    /// Returns up to `k` `(position, score)` pairs; ties broken by lower
    /// position. An empty index yields an empty result for any `k`.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<(usize, f32)>> {
        if self.vectors.is_empty() || k == 0 {
            return Ok(Vec::new());
        }
        if query.len() != self.dim {
            return Err(Error::Config(format!(
                "Query dimension mismatch: index has {}, query has {}",
                self.dim,
                query.len()
            )));
        }

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(position, vector)| (position, dot(query, vector)))
            .collect();

        // Descending score, ascending position for equal scores.
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        scored.truncate(k);
        Ok(scored)
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
