// ============================================================
// Layer 4 — Prepared Sample Records
// ============================================================
// The serialisable outputs of the prepare pipeline. These are
// ephemeral: created per corpus entry, written to disk, and
// consumed by whatever trains or evaluates the extractive
// reader. Sequence format: [CLS] question [SEP] context [SEP] [PAD]...

use serde::{Deserialize, Serialize};

/// One fully tokenised and padded training sample with its
/// token-level answer span. (0, 0) positions mean no answer
/// in this window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSample {
    pub input_ids:      Vec<u32>,
    pub attention_mask: Vec<u32>,
    pub start_position: usize,
    pub end_position:   usize,
}

/// One evaluation-side window: no labels, only the masked offset
/// mapping (None for every non-passage token) and enough
/// provenance to group predictions back by source passage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceWindow {
    pub passage_id:           String,
    pub source_passage_index: usize,
    pub input_ids:            Vec<u32>,
    pub attention_mask:       Vec<u32>,
    pub offsets:              Vec<Option<(usize, usize)>>,
}
