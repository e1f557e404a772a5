// ============================================================
// Layer 2 — Prepare Use Case
// ============================================================
// Turns the raw corpus into model-ready records:
//
//   Step 1: Load the SQuAD corpus              (Layer 4 - data)
//   Step 2: Window each (question, passage)    (Layer 6 - infra)
//   Step 3: Align answer spans per window      (Layer 4 - data)
//   Step 4: Serialise to JSON                  (serde_json)
//
// Two output modes:
//   - training samples: input ids, attention mask and the
//     token-level answer span per window ((0, 0) = no answer
//     in this window)
//   - inference windows (--inference): no labels, only the
//     masked offset mapping and provenance, for span decoding
//     at evaluation time

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::data::aligner::align_answer;
use crate::data::loader::SquadLoader;
use crate::data::sample::{InferenceWindow, TrainingSample};
use crate::domain::traits::{CorpusSource, WindowTokenizer};
use crate::infra::window_tokenizer::HfWindowTokenizer;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareConfig {
    pub corpus_path:    String,
    pub tokenizer_path: String,
    pub out_path:       String,

    /// Maximum tokens per window: [CLS] question [SEP] context [SEP]
    pub max_length: usize,

    /// Context-token overlap between consecutive windows
    pub stride: usize,

    /// Emit unlabelled inference windows instead of training samples
    pub inference: bool,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            corpus_path:    "data/train.json".to_string(),
            tokenizer_path: "checkpoints/tokenizer.json".to_string(),
            out_path:       "data/prepared.json".to_string(),
            max_length:     384,
            stride:         128,
            inference:      false,
        }
    }
}

pub struct PrepareUseCase {
    config: PrepareConfig,
}

impl PrepareUseCase {
    pub fn new(config: PrepareConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        // ── Step 1: Load the corpus ───────────────────────────────────────────
        let loader  = SquadLoader::new(&cfg.corpus_path);
        let entries = loader.load_all()?;

        let tokenizer = HfWindowTokenizer::from_file(&cfg.tokenizer_path)?;

        // ── Steps 2+3: Window and align every entry ───────────────────────────
        let mut samples     = Vec::new();
        let mut inf_windows = Vec::new();
        let mut answered    = 0usize;

        for (i, entry) in entries.iter().enumerate() {
            // The dataset sometimes pads questions with stray whitespace
            let question = entry.question.trim();
            let mut windows =
                tokenizer.windows(question, &entry.passage.text, cfg.max_length, cfg.stride)?;

            for window in &mut windows {
                window.source_passage_index = i;

                if cfg.inference {
                    inf_windows.push(InferenceWindow {
                        passage_id:           entry.passage.id.clone(),
                        source_passage_index: i,
                        input_ids:            window.input_ids.clone(),
                        attention_mask:       window.attention_mask.clone(),
                        offsets:              window.masked_offsets(),
                    });
                } else {
                    let (start, end) = align_answer(window, &entry.annotation);
                    if start != 0 || end != 0 {
                        answered += 1;
                    }
                    samples.push(TrainingSample {
                        input_ids:      window.input_ids.clone(),
                        attention_mask: window.attention_mask.clone(),
                        start_position: start,
                        end_position:   end,
                    });
                }
            }
        }

        // ── Step 4: Serialise ─────────────────────────────────────────────────
        if let Some(parent) = Path::new(&cfg.out_path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Cannot create '{}'", parent.display()))?;
            }
        }

        let json = if cfg.inference {
            tracing::info!(
                "Prepared {} inference windows from {} entries",
                inf_windows.len(),
                entries.len()
            );
            serde_json::to_string(&inf_windows)?
        } else {
            tracing::info!(
                "Prepared {} training windows from {} entries ({} with an in-window answer)",
                samples.len(),
                entries.len(),
                answered
            );
            serde_json::to_string(&samples)?
        };

        fs::write(&cfg.out_path, json)
            .with_context(|| format!("Cannot write '{}'", cfg.out_path))?;
        Ok(())
    }
}
