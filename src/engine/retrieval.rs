// ============================================================
// Layer 5 — Retrieval Engine
// ============================================================
// Online half of dense retrieval: embed the question with the
// same embedding capability that built the index, then ask the
// index for the k nearest passages.
//
// Stateless apart from the two shared handles. Both are
// read-only for the process lifetime; replacing the index after
// a rebuild means swapping the Arc, never mutating in place, so
// concurrent readers need no locking.

use std::sync::Arc;

use crate::domain::traits::Embedder;
use crate::engine::index::{RetrievalResult, VectorIndex};
use crate::error::QaResult;

pub struct RetrievalEngine {
    index:    Arc<VectorIndex>,
    embedder: Arc<dyn Embedder>,
}

impl RetrievalEngine {
    pub fn new(index: Arc<VectorIndex>, embedder: Arc<dyn Embedder>) -> Self {
        Self { index, embedder }
    }

    /// Embed the question and return up to k ranked candidates.
    pub fn retrieve(&self, question: &str, k: usize) -> QaResult<RetrievalResult> {
        let vector = self.embedder.embed(question)?;
        let result = self.index.query(&vector, k)?;
        tracing::debug!(
            "Retrieved {} of {} passages for question ({} requested)",
            result.len(),
            self.index.len(),
            k
        );
        Ok(result)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::passage::Passage;
    use crate::engine::index::Metric;
    use crate::infra::lexical::LexicalEmbedder;

    fn engine_over(corpus: &[(&str, &str)]) -> RetrievalEngine {
        let embedder = Arc::new(LexicalEmbedder::new(64));
        let passages: Vec<Passage> = corpus
            .iter()
            .map(|(id, text)| Passage::new(*id, *text))
            .collect();
        let index = VectorIndex::build(passages, embedder.as_ref(), Metric::Cosine).unwrap();
        RetrievalEngine::new(Arc::new(index), embedder)
    }

    #[test]
    fn test_result_length_is_min_of_k_and_corpus() {
        let engine = engine_over(&[
            ("p1", "fever is a common symptom"),
            ("p2", "drink water when you have a fever"),
            ("p3", "rest helps recovery"),
        ]);

        assert_eq!(engine.retrieve("fever", 2).unwrap().len(), 2);
        assert_eq!(engine.retrieve("fever", 10).unwrap().len(), 3);
    }

    #[test]
    fn test_repeated_queries_are_identical() {
        let engine = engine_over(&[
            ("p1", "fever is a common symptom"),
            ("p2", "drink water when you have a fever"),
        ]);

        let first  = engine.retrieve("what helps a fever", 2).unwrap();
        let second = engine.retrieve("what helps a fever", 2).unwrap();
        let ids = |r: &RetrievalResult| {
            r.iter().map(|s| s.passage.id.clone()).collect::<Vec<_>>()
        };
        assert_eq!(ids(&first), ids(&second));
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.score, b.score);
        }
    }

    #[test]
    fn test_empty_index_retrieves_nothing() {
        let engine = engine_over(&[]);
        assert!(engine.retrieve("anything", 5).unwrap().is_empty());
    }
}
