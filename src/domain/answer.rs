// ============================================================
// Layer 3 — Extracted Answer Domain Type
// ============================================================
// The final product of the online pipeline: the answer text,
// the extraction capability's confidence in it, and the id of
// the passage it was drawn from.
//
// "Could not answer" is a valid value of this type (empty text,
// no source passage), NOT an error — callers must treat it as a
// terminal state of the Answer Selector.

use serde::{Deserialize, Serialize};

/// The answer returned for one question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedAnswer {
    /// The extracted answer text; empty when no candidate
    /// passage yielded an answer
    pub text: String,

    /// Extraction confidence in [0, 1]
    pub confidence: f32,

    /// Id of the passage the answer was extracted from;
    /// None only in the no-answer state
    pub source_passage_id: Option<String>,
}

impl ExtractedAnswer {
    /// The "could not answer" terminal state. Carries the minimum
    /// confidence observed while scoring candidates so callers can
    /// still see how unsure the extractor was.
    pub fn no_answer(min_confidence: f32) -> Self {
        Self {
            text:              String::new(),
            confidence:        min_confidence,
            source_passage_id: None,
        }
    }

    pub fn is_no_answer(&self) -> bool {
        self.text.is_empty()
    }
}
