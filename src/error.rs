// ============================================================
// Cross-cutting — Error Taxonomy
// ============================================================
// Typed errors for the operations that can break an invariant:
//   - CorpusParse       → malformed dataset, aborts the offline build
//   - DimensionMismatch → embedding capability changed shape
//   - IndexLoad         → missing or corrupt persisted index
//   - WindowConfig      → impossible max_length / stride combination
//   - Capability        → an injected capability (embedder, extractor,
//                         tokenizer) failed; carries the original error
//
// "No answer found" is deliberately NOT here — it is a valid
// terminal state of the Answer Selector, surfaced as an
// ExtractedAnswer with empty text, never as an error.
//
// Application-layer code wraps these in anyhow for context;
// core modules return QaResult so callers can match on the cause.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QaError {
    /// The corpus file could not be read or is not valid SQuAD JSON.
    #[error("Failed to parse corpus '{path}': {reason}")]
    CorpusParse { path: PathBuf, reason: String },

    /// An embedding's dimension does not match the index dimension.
    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The persisted index file is missing, corrupt, or inconsistent.
    #[error("Cannot load index from '{path}': {reason}")]
    IndexLoad { path: PathBuf, reason: String },

    /// max_length cannot fit the question plus at least one context token,
    /// or the stride is not smaller than the per-window context capacity.
    #[error("Invalid window configuration: {reason}")]
    WindowConfig { reason: String },

    /// A black-box capability failed. The source error is preserved.
    #[error(transparent)]
    Capability(#[from] anyhow::Error),
}

/// Result alias for core operations.
pub type QaResult<T> = Result<T, QaError>;
