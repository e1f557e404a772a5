// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `build-index`, `prepare`
// and `ask`, plus all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, enum, etc.)

use clap::{Args, Subcommand, ValueEnum};

use crate::application::build_index_use_case::BuildIndexConfig;
use crate::application::prepare_use_case::PrepareConfig;
use crate::engine::index::Metric;
use crate::infra::lexical::LexicalEmbedder;

/// The three top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Embed the corpus passages and persist the vector index
    BuildIndex(BuildIndexArgs),

    /// Window and span-align the corpus into model-ready JSON
    Prepare(PrepareArgs),

    /// Ask a question against a built index
    Ask(AskArgs),
}

/// CLI-facing similarity metric. Kept separate from the engine
/// enum so clap never leaks below Layer 1.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum MetricArg {
    Cosine,
    InnerProduct,
}

impl From<MetricArg> for Metric {
    fn from(m: MetricArg) -> Self {
        match m {
            MetricArg::Cosine       => Metric::Cosine,
            MetricArg::InnerProduct => Metric::InnerProduct,
        }
    }
}

/// All arguments for the `build-index` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct BuildIndexArgs {
    /// SQuAD-format JSON corpus to index
    #[arg(long, default_value = "data/train.json")]
    pub corpus: String,

    /// Where to write the binary index file
    #[arg(long, default_value = "index/corpus.idx")]
    pub index_path: String,

    /// Similarity metric used at query time
    #[arg(long, value_enum, default_value_t = MetricArg::Cosine)]
    pub metric: MetricArg,

    /// Embedding dimension — queries must be embedded at the
    /// same dimension later
    #[arg(long, default_value_t = LexicalEmbedder::DEFAULT_DIM)]
    pub embed_dim: usize,
}

/// Convert CLI BuildIndexArgs into the application-layer config.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<BuildIndexArgs> for BuildIndexConfig {
    fn from(a: BuildIndexArgs) -> Self {
        BuildIndexConfig {
            corpus_path: a.corpus,
            index_path:  a.index_path,
            metric:      a.metric.into(),
            embed_dim:   a.embed_dim,
        }
    }
}

/// All arguments for the `prepare` command
#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// SQuAD-format JSON corpus to prepare
    #[arg(long, default_value = "data/train.json")]
    pub corpus: String,

    /// HuggingFace tokenizer.json file
    #[arg(long, default_value = "checkpoints/tokenizer.json")]
    pub tokenizer: String,

    /// Where to write the prepared JSON
    #[arg(long, default_value = "data/prepared.json")]
    pub out: String,

    /// Maximum tokens per window: [CLS] question [SEP] context [SEP]
    #[arg(long, default_value_t = 384)]
    pub max_length: usize,

    /// Context-token overlap between consecutive windows
    #[arg(long, default_value_t = 128)]
    pub stride: usize,

    /// Emit unlabelled inference windows instead of training samples
    #[arg(long)]
    pub inference: bool,
}

impl From<PrepareArgs> for PrepareConfig {
    fn from(a: PrepareArgs) -> Self {
        PrepareConfig {
            corpus_path:    a.corpus,
            tokenizer_path: a.tokenizer,
            out_path:       a.out,
            max_length:     a.max_length,
            stride:         a.stride,
            inference:      a.inference,
        }
    }
}

/// All arguments for the `ask` command
#[derive(Args, Debug)]
pub struct AskArgs {
    /// The natural language question to answer
    #[arg(long)]
    pub question: String,

    /// Binary index file written by `build-index`
    #[arg(long, default_value = "index/corpus.idx")]
    pub index_path: String,

    /// How many candidate passages to retrieve
    #[arg(long, default_value_t = 5)]
    pub top_k: usize,
}
