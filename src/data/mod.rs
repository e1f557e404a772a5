// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the raw dataset file and the records the
// rest of the system consumes.
//
// The offline pipeline flows in this order:
//
//   SQuAD JSON file
//       │
//       ▼
//   SquadLoader      → corpus entries (passage, question, annotation)
//       │
//       ▼
//   split_windows    → overlapping tokenization windows
//       │
//       ▼
//   align_answer     → token-level answer spans per window
//       │
//       ▼
//   TrainingSample / InferenceWindow → serialised to disk
//
// Each module is responsible for exactly one step, so each step
// is independently testable and replaceable.

/// Parses the SQuAD-format corpus file
pub mod loader;

/// TokenWindow and the sliding-window splitter
pub mod windows;

/// Character span → token span alignment
pub mod aligner;

/// Serialisable prepared-sample records
pub mod sample;
