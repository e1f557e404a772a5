// ============================================================
// Layer 6 — Index Store
// ============================================================
// Saves and restores the vector index as a single binary file.
//
// What gets saved:
//   - a 4-byte magic and a format version, so a wrong or
//     truncated file is rejected before deserialisation is
//     trusted
//   - the VectorIndex itself: dimension, metric, one vector per
//     passage AND the passages, so the row ↔ passage
//     correspondence survives the round-trip
//
// Loading NEVER returns a partial index: any read, decode or
// consistency failure is an IndexLoad error and the caller
// aborts. Replacing a served index means writing a new file and
// swapping the loaded handle, not mutating in place.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::{BufReader, BufWriter},
    path::PathBuf,
};

use crate::engine::index::VectorIndex;
use crate::error::QaError;

const MAGIC: [u8; 4] = *b"CQIX";
const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct IndexFile {
    magic:   [u8; 4],
    version: u32,
    index:   VectorIndex,
}

/// Manages persistence of one index file.
pub struct IndexStore {
    path: PathBuf,
}

impl IndexStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Write the index to disk, creating parent directories as
    /// needed.
    pub fn save(&self, index: &VectorIndex) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Cannot create index directory '{}'", parent.display())
                })?;
            }
        }

        let file = File::create(&self.path)
            .with_context(|| format!("Cannot create '{}'", self.path.display()))?;
        let record = IndexFile {
            magic:   MAGIC,
            version: FORMAT_VERSION,
            index:   index.clone(),
        };
        bincode::serialize_into(BufWriter::new(file), &record)
            .with_context(|| format!("Cannot write index to '{}'", self.path.display()))?;

        tracing::info!(
            "Saved index ({} passages, dim {}) to '{}'",
            index.len(),
            index.dim(),
            self.path.display()
        );
        Ok(())
    }

    /// Load and validate the index. Missing file, corrupt bytes,
    /// wrong magic/version and internal inconsistency are all
    /// IndexLoad errors.
    pub fn load(&self) -> Result<VectorIndex, QaError> {
        let file = File::open(&self.path).map_err(|e| QaError::IndexLoad {
            path:   self.path.clone(),
            reason: format!("{e}. Have you run 'build-index' first?"),
        })?;

        let record: IndexFile = bincode::deserialize_from(BufReader::new(file))
            .map_err(|e| QaError::IndexLoad {
                path:   self.path.clone(),
                reason: format!("corrupt index file: {e}"),
            })?;

        if record.magic != MAGIC {
            return Err(QaError::IndexLoad {
                path:   self.path.clone(),
                reason: "not an index file (bad magic)".to_string(),
            });
        }
        if record.version != FORMAT_VERSION {
            return Err(QaError::IndexLoad {
                path:   self.path.clone(),
                reason: format!(
                    "unsupported format version {} (expected {})",
                    record.version, FORMAT_VERSION
                ),
            });
        }

        record.index.validate().map_err(|reason| QaError::IndexLoad {
            path: self.path.clone(),
            reason,
        })?;

        tracing::info!(
            "Loaded index ({} passages, dim {}) from '{}'",
            record.index.len(),
            record.index.dim(),
            self.path.display()
        );
        Ok(record.index)
    }
}
