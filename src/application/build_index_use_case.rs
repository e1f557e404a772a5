// ============================================================
// Layer 2 — Build Index Use Case
// ============================================================
// The offline half of the system. Orchestrates:
//
//   Step 1: Load the SQuAD corpus        (Layer 4 - data)
//   Step 2: Collect passages             (Layer 3 - domain)
//   Step 3: Embed + build vector index   (Layer 5 - engine)
//   Step 4: Persist the index            (Layer 6 - infra)
//
// Runs as a one-time batch job, never on the request path.
// Any corpus parse failure or embedding dimension mismatch
// aborts the build with a non-zero exit — a partial index is
// never written.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::loader::SquadLoader;
use crate::domain::passage::Passage;
use crate::domain::traits::CorpusSource;
use crate::engine::index::{Metric, VectorIndex};
use crate::infra::index_store::IndexStore;
use crate::infra::lexical::LexicalEmbedder;

/// All settings for an index build. Serialisable so a build can
/// be reproduced from a recorded config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildIndexConfig {
    pub corpus_path: String,
    pub index_path:  String,
    pub metric:      Metric,
    pub embed_dim:   usize,
}

impl Default for BuildIndexConfig {
    fn default() -> Self {
        Self {
            corpus_path: "data/train.json".to_string(),
            index_path:  "index/corpus.idx".to_string(),
            metric:      Metric::Cosine,
            embed_dim:   LexicalEmbedder::DEFAULT_DIM,
        }
    }
}

pub struct BuildIndexUseCase {
    config: BuildIndexConfig,
}

impl BuildIndexUseCase {
    pub fn new(config: BuildIndexConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        // ── Step 1: Load the corpus ───────────────────────────────────────────
        tracing::info!("Loading corpus from '{}'", cfg.corpus_path);
        let loader  = SquadLoader::new(&cfg.corpus_path);
        let entries = loader.load_all()?;

        // ── Step 2: Collect passages in corpus order ──────────────────────────
        let passages: Vec<Passage> = entries.into_iter().map(|e| e.passage).collect();
        tracing::info!("Collected {} passages", passages.len());

        // ── Step 3: Embed and build the index ─────────────────────────────────
        let embedder = LexicalEmbedder::new(cfg.embed_dim);
        let index    = VectorIndex::build(passages, &embedder, cfg.metric)?;

        // ── Step 4: Persist ───────────────────────────────────────────────────
        IndexStore::new(&cfg.index_path).save(&index)?;

        Ok(())
    }
}
