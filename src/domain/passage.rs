// ============================================================
// Layer 3 — Passage Domain Type
// ============================================================
// A passage is the unit of retrievable text: one context
// paragraph with a unique id. Immutable once loaded — the
// vector index relies on row i always meaning passages[i].
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};

/// One retrievable context paragraph from the corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    /// Unique id — kept for traceability so we know which
    /// corpus entry an answer came from
    pub id: String,

    /// The full passage text, exactly as it appears in the
    /// dataset (character offsets in annotations index into it)
    pub text: String,
}

impl Passage {
    /// Create a new Passage. Uses impl Into<String> so callers
    /// can pass &str or String.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id:   id.into(),
            text: text.into(),
        }
    }
}
