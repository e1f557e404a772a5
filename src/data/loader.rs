// ============================================================
// Layer 4 — Corpus Loader
// ============================================================
// Loads a SQuAD-format JSON dataset and flattens it into
// corpus entries.
//
// The SQuAD structure is nested:
//   { "data": [ { "paragraphs": [ { "context": "...",
//       "qas": [ { "id", "question", "answers": [
//           { "text", "answer_start" } ] } ] } ] } ] }
//
// We walk articles → paragraphs → questions, producing one
// CorpusEntry per question with the paragraph context as its
// passage. The question id doubles as the passage id, so ids
// are unique even though contexts repeat across questions.
//
// Annotation policy (SQuAD v2): a question with a missing or
// empty "answers" array is unanswerable — it is kept with the
// empty-annotation sentinel, never dropped. Only the first
// listed answer is used; additional answers are evaluation
// aliases.
//
// Coordinate systems: SQuAD's "answer_start" counts CHARACTERS
// (Python string indexing), while tokenizer offsets and the
// aligner count BYTES. The loader converts to byte offsets here
// so everything downstream shares one coordinate system; the two
// only differ when the context contains multi-byte characters.
//
// A file that cannot be read or parsed is a fatal
// CorpusParse error — the offline build must not continue on
// a partial corpus.
//
// Reference: Rajpurkar et al. (2016, 2018) - SQuAD papers

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};

use crate::domain::annotation::{AnswerAnnotation, CorpusEntry};
use crate::domain::passage::Passage;
use crate::domain::traits::CorpusSource;
use crate::error::QaError;

/// Loads corpus entries from one SQuAD-format JSON file.
/// Implements the CorpusSource trait from Layer 3.
pub struct SquadLoader {
    path: PathBuf,
}

impl SquadLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse SQuAD JSON from an in-memory string.
    /// Split out from load_all so tests can exercise the parser
    /// without touching the filesystem.
    pub fn parse_str(&self, json: &str) -> Result<Vec<CorpusEntry>, QaError> {
        let file: SquadFile =
            serde_json::from_str(json).map_err(|e| QaError::CorpusParse {
                path:   self.path.clone(),
                reason: e.to_string(),
            })?;

        let mut entries = Vec::new();
        for article in file.data {
            for paragraph in article.paragraphs {
                for qa in paragraph.qas {
                    // First listed answer, or the empty sentinel for
                    // unanswerable / unannotated questions. The char
                    // offset is rebased to bytes against the context.
                    let annotation = qa
                        .answers
                        .into_iter()
                        .next()
                        .map(|a| {
                            let start = byte_offset(&paragraph.context, a.answer_start);
                            AnswerAnnotation::new(a.text, start)
                        })
                        .unwrap_or_else(AnswerAnnotation::empty);

                    entries.push(CorpusEntry {
                        passage:  Passage::new(qa.id, paragraph.context.clone()),
                        question: qa.question,
                        annotation,
                    });
                }
            }
        }

        Ok(entries)
    }
}

/// Byte offset of the `char_offset`-th character of `text`.
/// Clamps to the text length for out-of-range offsets.
fn byte_offset(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(b, _)| b)
        .unwrap_or(text.len())
}

impl CorpusSource for SquadLoader {
    fn load_all(&self) -> Result<Vec<CorpusEntry>> {
        let json = fs::read_to_string(&self.path).map_err(|e| QaError::CorpusParse {
            path:   self.path.clone(),
            reason: e.to_string(),
        })?;

        let entries = self.parse_str(&json)?;

        let unanswerable = entries.iter().filter(|e| e.annotation.is_empty()).count();
        tracing::info!(
            "Loaded {} corpus entries from '{}' ({} without an answer)",
            entries.len(),
            self.path.display(),
            unanswerable
        );
        Ok(entries)
    }
}

// ─── SQuAD JSON shape ─────────────────────────────────────────────────────────
// Private serde mirror of the dataset file. Fields that may be
// absent in malformed entries default to empty collections so a
// single bad entry degrades to the sentinel instead of failing
// the whole parse.

#[derive(Deserialize)]
struct SquadFile {
    data: Vec<SquadArticle>,
}

#[derive(Deserialize)]
struct SquadArticle {
    #[serde(default)]
    paragraphs: Vec<SquadParagraph>,
}

#[derive(Deserialize)]
struct SquadParagraph {
    context: String,
    #[serde(default)]
    qas: Vec<SquadQuestion>,
}

#[derive(Deserialize)]
struct SquadQuestion {
    id:       String,
    question: String,
    #[serde(default)]
    answers: Vec<SquadAnswer>,
}

#[derive(Deserialize)]
struct SquadAnswer {
    text:         String,
    answer_start: usize,
}
