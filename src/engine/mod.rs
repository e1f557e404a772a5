// ============================================================
// Layer 5 — Retrieval + Selection Engine
// ============================================================
// The online question-answering core:
//
//   question
//       │
//       ▼
//   RetrievalEngine  → embeds the question, queries the vector
//       │              index for the k nearest passages
//       ▼
//   AnswerSelector   → extracts an answer from each candidate,
//       │              picks the most confident one
//       ▼
//   ExtractedAnswer  → (text, confidence, source passage)
//
// Both engines hold shared read-only handles (index, embedder,
// extractor) injected at construction — no global state.

/// Exact nearest-neighbour index over passage embeddings
pub mod index;

/// Question embedding + index query
pub mod retrieval;

/// Candidate scoring and best-answer selection
pub mod selector;
