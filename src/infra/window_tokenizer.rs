// ============================================================
// Layer 6 — Window Tokenizer Adapter
// ============================================================
// Implements the WindowTokenizer capability over a HuggingFace
// tokenizer JSON file (the `tokenizers` crate).
//
// Question and context are encoded separately WITHOUT special
// tokens; the pure `split_windows` function then assembles the
// [CLS] q [SEP] ctx [SEP] windows and the per-token metadata.
// Doing the windowing ourselves keeps the overlap semantics in
// one tested place instead of depending on the crate's
// truncation configuration.
//
// The context encoding's offsets are byte offsets into the
// passage text — the same coordinate system the corpus loader
// rebases answer annotations into, which is what makes offset
// alignment possible downstream.

use anyhow::Result;
use std::path::Path;
use tokenizers::Tokenizer;

use crate::data::windows::{split_windows, TokenWindow};
use crate::domain::traits::WindowTokenizer;

pub struct HfWindowTokenizer {
    tokenizer: Tokenizer,
}

impl HfWindowTokenizer {
    /// Load a tokenizer from a HuggingFace tokenizer.json file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let tokenizer = Tokenizer::from_file(path).map_err(|e| {
            anyhow::anyhow!("Cannot load tokenizer from '{}': {e}", path.display())
        })?;
        tracing::debug!("Loaded tokenizer from '{}'", path.display());
        Ok(Self { tokenizer })
    }
}

impl WindowTokenizer for HfWindowTokenizer {
    fn windows(
        &self,
        question:   &str,
        context:    &str,
        max_length: usize,
        stride:     usize,
    ) -> Result<Vec<TokenWindow>> {
        let q_enc = self
            .tokenizer
            .encode(question, false)
            .map_err(|e| anyhow::anyhow!("Question tokenise: {e}"))?;
        let c_enc = self
            .tokenizer
            .encode(context, false)
            .map_err(|e| anyhow::anyhow!("Context tokenise: {e}"))?;

        let windows = split_windows(
            q_enc.get_ids(),
            c_enc.get_ids(),
            c_enc.get_offsets(),
            max_length,
            stride,
        )?;
        Ok(windows)
    }
}
