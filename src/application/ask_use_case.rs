// ============================================================
// Layer 2 — Ask Use Case
// ============================================================
// The online half of the system. Wires the capability graph:
//
//   IndexStore ──▶ VectorIndex ──▶ RetrievalEngine ─┐
//                                                   ├─▶ answer
//   LexicalExtractor ──▶ AnswerSelector ────────────┘
//
// Construction is fail-fast: a missing or corrupt index aborts
// with a hint to run `build-index` first. Answering never fails
// on "no good answer" — that is a value, not an error.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::domain::answer::ExtractedAnswer;
use crate::domain::traits::QuestionAnswerer;
use crate::engine::retrieval::RetrievalEngine;
use crate::engine::selector::AnswerSelector;
use crate::infra::index_store::IndexStore;
use crate::infra::lexical::{LexicalEmbedder, LexicalExtractor};

pub struct AskUseCase {
    engine:   RetrievalEngine,
    selector: AnswerSelector,
    top_k:    usize,
}

impl AskUseCase {
    /// Load the persisted index and assemble the answering pipeline.
    pub fn new(index_path: impl AsRef<Path>, top_k: usize) -> Result<Self> {
        // ── Step 1: Load the persisted index ──────────────────────────────────
        let index = IndexStore::new(index_path.as_ref()).load()?;
        tracing::info!(
            "Loaded index: {} passages, dim {}, metric {:?}",
            index.len(),
            index.dim(),
            index.metric()
        );

        // ── Step 2: Wire the capability graph ─────────────────────────────────
        // The query embedder must match the index dimension. max(1)
        // covers the degenerate empty index, whose dim is 0.
        let embedder = Arc::new(LexicalEmbedder::new(index.dim().max(1)));
        let engine   = RetrievalEngine::new(Arc::new(index), embedder);
        let selector = AnswerSelector::new(Arc::new(LexicalExtractor));

        Ok(Self { engine, selector, top_k })
    }
}

impl QuestionAnswerer for AskUseCase {
    fn answer(&self, question: &str) -> Result<ExtractedAnswer> {
        // ── Step 1: Retrieve candidate passages ───────────────────────────────
        let candidates = self.engine.retrieve(question, self.top_k)?;
        if candidates.is_empty() {
            tracing::warn!("Index is empty — nothing to answer from");
            return Ok(ExtractedAnswer::no_answer(0.0));
        }

        // ── Step 2: Select the best span across candidates ────────────────────
        let answer = self.selector.select_answer(question, &candidates)?;
        Ok(answer)
    }
}
