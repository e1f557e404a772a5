// ============================================================
// Layer 2 — Application Layer
// ============================================================
// One use case per CLI command. Use cases orchestrate the lower
// layers and own all cross-layer wiring; nothing below this
// layer constructs its own dependencies.

/// `build-index`: corpus → embeddings → persisted vector index
pub mod build_index_use_case;

/// `prepare`: corpus → windowed, span-aligned model inputs
pub mod prepare_use_case;

/// `ask`: question → retrieval → span selection → answer
pub mod ask_use_case;
