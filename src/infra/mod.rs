// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Everything that touches the filesystem or wraps an external
// capability behind a Layer 3 trait:
//
//   - IndexStore         → binary persistence of the vector index
//   - HfWindowTokenizer  → tokenizers-crate WindowTokenizer adapter
//   - Lexical adapters   → deterministic Embedder / AnswerExtractor
//                          defaults for a model-free deployment

/// Binary save/load of the vector index
pub mod index_store;

/// WindowTokenizer over a HuggingFace tokenizer.json
pub mod window_tokenizer;

/// Model-free embedding and extraction defaults
pub mod lexical;
