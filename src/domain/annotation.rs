// ============================================================
// Layer 3 — Answer Annotation Domain Types
// ============================================================
// An answer label for one (passage, question) pair. The answer
// is a SPAN within the passage text:
//   - `text`       is the exact answer substring
//   - `char_start` is its byte offset into the passage (the
//     corpus loader rebases SQuAD's character offsets to bytes)
//
// SQuAD v2 style: an unanswerable question carries the empty
// annotation sentinel (empty text, char_start 0). The Offset
// Aligner maps the empty sentinel to token positions (0, 0).
//
// Reference: Rajpurkar et al. (2018) - SQuAD 2.0 paper

use serde::{Deserialize, Serialize};

use crate::domain::passage::Passage;

/// A character-level answer span, or the empty no-answer sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerAnnotation {
    /// The answer text as it appears in the passage
    pub text: String,

    /// Byte offset of the first answer character in the passage
    pub char_start: usize,
}

impl AnswerAnnotation {
    pub fn new(text: impl Into<String>, char_start: usize) -> Self {
        Self { text: text.into(), char_start }
    }

    /// The no-answer sentinel used for unanswerable questions
    /// and for malformed corpus entries with no annotation.
    pub fn empty() -> Self {
        Self { text: String::new(), char_start: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// One past the last answer character (half-open end).
    pub fn char_end(&self) -> usize {
        self.char_start + self.text.len()
    }
}

/// One corpus row: a passage, the question asked of it, and the
/// character-level answer label. Produced by the corpus loader,
/// one entry per dataset question (passage id = question id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusEntry {
    pub passage:    Passage,
    pub question:   String,
    pub annotation: AnswerAnnotation,
}
