// ============================================================
// Layer 5 — Answer Selector
// ============================================================
// Scores every retrieved candidate with the extraction
// capability and picks the best one.
//
// Two-pass design, kept deliberately:
//   Pass 1 — extract from every candidate in retrieval order,
//            tracking the maximum confidence seen.
//   Pass 2 — re-extract from the single winning passage and
//            return THAT result.
// The second pass guards against a non-deterministic extraction
// capability: the returned answer always comes from a fresh call
// on the passage that produced the winning score, with identical
// extraction logic in both passes.
//
// Tie-break: strict greater-than while scanning, so of several
// candidates sharing the maximum confidence the first in
// retrieval order wins, deterministically.
//
// No-answer policy: if every candidate signals no-answer, the
// result carries empty text and the minimum observed confidence.
// That is a valid terminal state, not an error. A candidate
// whose extraction CALL fails is logged and treated as
// no-answer rather than failing the whole request.

use std::sync::Arc;

use crate::domain::answer::ExtractedAnswer;
use crate::domain::traits::{AnswerExtractor, Extraction};
use crate::engine::index::RetrievalResult;
use crate::error::QaResult;

pub struct AnswerSelector {
    extractor: Arc<dyn AnswerExtractor>,
}

impl AnswerSelector {
    pub fn new(extractor: Arc<dyn AnswerExtractor>) -> Self {
        Self { extractor }
    }

    /// Pick the best answer among the retrieved candidates.
    pub fn select_answer(
        &self,
        question:   &str,
        candidates: &RetrievalResult,
    ) -> QaResult<ExtractedAnswer> {
        if candidates.is_empty() {
            return Ok(ExtractedAnswer::no_answer(0.0));
        }

        // ── Pass 1: score every candidate ─────────────────────────────────────
        let mut best_idx        = 0usize;
        let mut best_confidence = f32::NEG_INFINITY;
        let mut min_confidence  = f32::INFINITY;
        let mut any_answer      = false;

        for (i, candidate) in candidates.iter().enumerate() {
            let extraction = match self.extractor.extract(question, &candidate.passage.text) {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(
                        "Extraction failed on passage '{}': {e}",
                        candidate.passage.id
                    );
                    Extraction::no_answer()
                }
            };

            min_confidence = min_confidence.min(extraction.confidence);
            if !extraction.is_no_answer() {
                any_answer = true;
            }
            if extraction.confidence > best_confidence {
                best_confidence = extraction.confidence;
                best_idx        = i;
            }
        }

        if !any_answer {
            tracing::info!("No candidate passage yielded an answer");
            return Ok(ExtractedAnswer::no_answer(min_confidence));
        }

        // ── Pass 2: fresh extraction on the winner ────────────────────────────
        let winner = &candidates[best_idx];
        let final_extraction =
            match self.extractor.extract(question, &winner.passage.text) {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(
                        "Final extraction failed on passage '{}': {e}",
                        winner.passage.id
                    );
                    return Ok(ExtractedAnswer::no_answer(min_confidence));
                }
            };

        if final_extraction.is_no_answer() {
            return Ok(ExtractedAnswer::no_answer(min_confidence));
        }

        tracing::debug!(
            "Best answer from passage '{}' (confidence {:.4})",
            winner.passage.id,
            final_extraction.confidence
        );

        Ok(ExtractedAnswer {
            text:              final_extraction.text,
            confidence:        final_extraction.confidence,
            source_passage_id: Some(winner.passage.id.clone()),
        })
    }
}
