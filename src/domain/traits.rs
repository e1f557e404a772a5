// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The capability seams of the system. The embedding model, the
// extractive reader and the tokenizer are black boxes behind
// these traits — the core never sees a model framework type.
//
// By programming against traits instead of concrete types we
// can swap implementations without changing the callers:
//   - LexicalEmbedder implements Embedder
//   - a neural sentence encoder could also implement Embedder
//   - the Retrieval Engine only sees Embedder and works with both
//
// There is no hidden global state: implementations are
// constructed once at startup and injected by handle.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)
//            Rust Book §17 (Object Oriented Patterns)

use anyhow::Result;

use crate::data::windows::TokenWindow;
use crate::domain::annotation::CorpusEntry;
use crate::domain::answer::ExtractedAnswer;

// ─── Embedder ─────────────────────────────────────────────────────────────────
/// Maps text to a fixed-dimension vector.
///
/// Contract: deterministic for identical input, and the output
/// dimension never changes for the lifetime of the instance.
/// Send + Sync because the offline index build embeds passages
/// in parallel.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

// ─── AnswerExtractor ──────────────────────────────────────────────────────────
/// The single fixed record shape at the extraction boundary.
///
/// Whatever the underlying capability returns (a list, a single
/// item, a missing field) is normalised into this record by the
/// adapter before it enters the core — the core never branches
/// on shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub text:       String,
    pub confidence: f32,
}

impl Extraction {
    /// The capability's "no answer" signal.
    pub fn no_answer() -> Self {
        Self { text: String::new(), confidence: 0.0 }
    }

    pub fn is_no_answer(&self) -> bool {
        self.text.is_empty() || self.confidence <= 0.0
    }
}

/// Extracts an answer span from a single (question, context) pair.
/// Confidence is in [0, 1]; no-answer is `Extraction::no_answer()`.
pub trait AnswerExtractor {
    fn extract(&self, question: &str, context: &str) -> Result<Extraction>;
}

// ─── WindowTokenizer ──────────────────────────────────────────────────────────
/// Tokenizes a (question, context) pair into overlapping,
/// length-bounded windows. Deterministic: the window count
/// depends only on context length, max_length and stride.
///
/// `source_passage_index` on the returned windows is stamped by
/// the caller, which knows the corpus position.
pub trait WindowTokenizer {
    fn windows(
        &self,
        question:   &str,
        context:    &str,
        max_length: usize,
        stride:     usize,
    ) -> Result<Vec<TokenWindow>>;
}

// ─── CorpusSource ─────────────────────────────────────────────────────────────
/// Any component that can load the QA corpus.
///
/// Implementations:
///   - SquadLoader → parses a SQuAD-format JSON file
pub trait CorpusSource {
    /// Load every corpus entry, in dataset order. Entries with no
    /// annotation are kept with the empty sentinel, never dropped.
    fn load_all(&self) -> Result<Vec<CorpusEntry>>;
}

// ─── QuestionAnswerer ─────────────────────────────────────────────────────────
/// Any component that can answer natural language questions.
///
/// Implementations:
///   - AskUseCase → dense retrieval + extraction pipeline
pub trait QuestionAnswerer {
    /// Answer one question. A no-answer result is a valid value,
    /// not an error.
    fn answer(&self, question: &str) -> Result<ExtractedAnswer>;
}
