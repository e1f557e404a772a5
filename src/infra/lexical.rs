// ============================================================
// Layer 6 — Lexical Capability Adapters
// ============================================================
// Deterministic, model-free implementations of the Embedder and
// AnswerExtractor capabilities, so the binary runs end-to-end
// without downloading model weights. A neural sentence encoder
// and an extractive reader plug in behind the same traits.
//
// LexicalEmbedder — hashed bag-of-words term frequencies:
//   each word is lowercased, stripped of edge punctuation and
//   hashed into one of `dim` slots. Identical text always maps
//   to the identical vector (std's SipHash with fixed keys), and
//   the dimension never changes for the instance, which is all
//   the Embedder contract requires.
//
// LexicalExtractor — keyword-overlap span selection:
//   the context is split into sentence segments and each segment
//   is scored by the total length of question key terms it
//   contains, normalised by the total key-term weight. Longer,
//   more specific terms outrank short generic ones. The best
//   segment is the answer; no overlap at all is a no-answer.

use anyhow::Result;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::domain::traits::{AnswerExtractor, Embedder, Extraction};

/// Lowercase a word and strip non-alphanumeric edge characters.
fn normalise(word: &str) -> String {
    word.to_lowercase()
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_string()
}

// ─── LexicalEmbedder ──────────────────────────────────────────────────────────

pub struct LexicalEmbedder {
    dim: usize,
}

impl LexicalEmbedder {
    pub const DEFAULT_DIM: usize = 256;

    pub fn new(dim: usize) -> Self {
        assert!(dim > 0, "embedding dimension must be positive");
        Self { dim }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }
}

impl Embedder for LexicalEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0f32; self.dim];
        for word in text.split_whitespace() {
            let w = normalise(word);
            if w.is_empty() {
                continue;
            }
            // DefaultHasher::new() uses fixed keys, so slots are
            // stable across runs and processes
            let mut hasher = DefaultHasher::new();
            w.hash(&mut hasher);
            let slot = (hasher.finish() as usize) % self.dim;
            vector[slot] += 1.0;
        }
        Ok(vector)
    }
}

// ─── LexicalExtractor ─────────────────────────────────────────────────────────

pub struct LexicalExtractor;

impl AnswerExtractor for LexicalExtractor {
    fn extract(&self, question: &str, context: &str) -> Result<Extraction> {
        // Keep words longer than 3 chars, plus short numeric tokens
        // (e.g. "2" in "type 2")
        let key_terms: Vec<String> = question
            .split_whitespace()
            .map(|w| normalise(w))
            .filter(|w| {
                !w.is_empty()
                    && (w.len() > 3 || w.chars().all(|c| c.is_ascii_digit()))
            })
            .collect();

        if key_terms.is_empty() {
            return Ok(Extraction::no_answer());
        }

        // Weight each match by term length — longer, more specific
        // terms outrank short generic ones
        let total_weight: f32 =
            key_terms.iter().map(|w| w.len() as f32).sum::<f32>() + 1.0;

        let segments = context
            .split(['.', '!', '?', '\n'])
            .map(str::trim)
            .filter(|s| s.len() > 2);

        let mut best_segment: Option<&str> = None;
        let mut best_score = 0.0f32;

        for segment in segments {
            let lower = segment.to_lowercase();
            let score = key_terms
                .iter()
                .filter(|term| lower.contains(term.as_str()))
                .map(|term| term.len() as f32)
                .sum::<f32>()
                / total_weight;

            // Strict > keeps the earliest best segment
            if score > best_score {
                best_score   = score;
                best_segment = Some(segment);
            }
        }

        match best_segment {
            Some(segment) => Ok(Extraction {
                text:       segment.to_string(),
                confidence: best_score.min(1.0),
            }),
            None => Ok(Extraction::no_answer()),
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedder_is_deterministic_and_fixed_dimension() {
        let embedder = LexicalEmbedder::new(32);
        let a = embedder.embed("Drink water when you have a fever.").unwrap();
        let b = embedder.embed("Drink water when you have a fever.").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 32);
    }

    #[test]
    fn test_embedder_ignores_case_and_edge_punctuation() {
        let embedder = LexicalEmbedder::new(32);
        let a = embedder.embed("Fever!").unwrap();
        let b = embedder.embed("fever").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_embedder_empty_text_is_zero_vector() {
        let embedder = LexicalEmbedder::new(8);
        let v = embedder.embed("").unwrap();
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_extractor_picks_overlapping_sentence() {
        let context = "Rest is important. Drink water when you have a fever. Call a doctor if it persists.";
        let extraction = LexicalExtractor
            .extract("What should I drink for a fever?", context)
            .unwrap();
        assert_eq!(extraction.text, "Drink water when you have a fever");
        assert!(extraction.confidence > 0.0);
        assert!(extraction.confidence <= 1.0);
    }

    #[test]
    fn test_extractor_no_overlap_is_no_answer() {
        let extraction = LexicalExtractor
            .extract("Where is the train station?", "Fever is a common symptom.")
            .unwrap();
        assert!(extraction.is_no_answer());
    }

    #[test]
    fn test_extractor_question_without_key_terms_is_no_answer() {
        // Every word is too short to be a key term
        let extraction = LexicalExtractor
            .extract("is it so?", "Fever is a common symptom.")
            .unwrap();
        assert!(extraction.is_no_answer());
    }
}
