// ============================================================
// Layer 5 — Vector Index
// ============================================================
// One fixed-dimension embedding per passage plus exact
// brute-force nearest-neighbour search over them.
//
// Built once as an offline batch job, queried many times,
// never mutated afterwards. Row i of `vectors` always belongs
// to `passages[i]` — the two are persisted together so the
// correspondence survives a save/load round-trip.
//
// Determinism: search is EXACT (no approximate structure, no
// random seed). For a fixed index and query vector, repeated
// queries return identical ordered results; any discrepancy is
// a correctness bug. At the corpus sizes this system serves,
// a linear scan is cheaper than maintaining an ANN graph.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::domain::passage::Passage;
use crate::domain::traits::Embedder;
use crate::error::{QaError, QaResult};

/// Similarity metric, fixed at build time and persisted with
/// the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    Cosine,
    InnerProduct,
}

impl Metric {
    fn score(&self, a: &[f32], b: &[f32]) -> f32 {
        let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        match self {
            Metric::InnerProduct => dot,
            Metric::Cosine => {
                let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
                let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
                if norm_a == 0.0 || norm_b == 0.0 {
                    0.0
                } else {
                    dot / (norm_a * norm_b)
                }
            }
        }
    }
}

/// One retrieved passage with its similarity score.
#[derive(Debug, Clone)]
pub struct ScoredPassage {
    pub passage: Passage,
    pub score:   f32,
}

/// Ordered retrieval candidates: descending score, ties broken
/// by original corpus order, length ≤ k.
pub type RetrievalResult = Vec<ScoredPassage>;

/// The persistable search structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorIndex {
    dim:      usize,
    metric:   Metric,
    vectors:  Vec<Vec<f32>>,
    passages: Vec<Passage>,
}

impl VectorIndex {
    /// Embed every passage (order preserved, parallelised across
    /// passages) and build the index.
    ///
    /// Fails with DimensionMismatch if any embedding's dimension
    /// differs from the first one — the embedding capability
    /// changed shape mid-build and the index would be unusable.
    /// An empty corpus builds an empty index.
    pub fn build(
        passages: Vec<Passage>,
        embedder: &dyn Embedder,
        metric:   Metric,
    ) -> QaResult<Self> {
        let vectors: Vec<Vec<f32>> = passages
            .par_iter()
            .map(|p| embedder.embed(&p.text))
            .collect::<anyhow::Result<_>>()?;

        let dim = vectors.first().map(|v| v.len()).unwrap_or(0);
        for v in &vectors {
            if v.len() != dim {
                return Err(QaError::DimensionMismatch {
                    expected: dim,
                    actual:   v.len(),
                });
            }
        }

        tracing::info!(
            "Built vector index: {} passages, dimension {}, metric {:?}",
            passages.len(),
            dim,
            metric
        );

        Ok(Self { dim, metric, vectors, passages })
    }

    /// Return the k nearest passages to `vector`.
    ///
    /// A corpus smaller than k returns every passage; an empty
    /// index returns an empty result, not an error. A query
    /// vector of the wrong dimension is a DimensionMismatch.
    pub fn query(&self, vector: &[f32], k: usize) -> QaResult<RetrievalResult> {
        if self.passages.is_empty() {
            return Ok(Vec::new());
        }
        if vector.len() != self.dim {
            return Err(QaError::DimensionMismatch {
                expected: self.dim,
                actual:   vector.len(),
            });
        }

        let mut scored: RetrievalResult = self
            .vectors
            .iter()
            .zip(self.passages.iter())
            .map(|(v, p)| ScoredPassage {
                passage: p.clone(),
                score:   self.metric.score(vector, v),
            })
            .collect();

        // Stable sort: equal scores keep corpus order, so results
        // are deterministic across runs
        scored.sort_by(|a, b| {
            b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal)
        });
        scored.truncate(k);
        Ok(scored)
    }

    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Internal consistency check, run after deserialisation so a
    /// corrupt file never becomes a silently partial index.
    pub fn validate(&self) -> Result<(), String> {
        if self.vectors.len() != self.passages.len() {
            return Err(format!(
                "index has {} vectors but {} passages",
                self.vectors.len(),
                self.passages.len()
            ));
        }
        if let Some(v) = self.vectors.iter().find(|v| v.len() != self.dim) {
            return Err(format!(
                "vector of dimension {} in an index of dimension {}",
                v.len(),
                self.dim
            ));
        }
        Ok(())
    }
}
