// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs and traits defining the core concepts of
// the system.
//
// Rules for this layer:
//   - NO model framework or tokenizer types allowed here
//   - NO file I/O or network calls
//   - Only plain structs, enums, and traits
//
// This keeps the domain easy to unit test and makes every
// capability swappable behind a trait.

// A retrievable context passage
pub mod passage;

// Character-level answer annotations and corpus rows
pub mod annotation;

// The final (answer text, confidence) result
pub mod answer;

// Capability seams (traits) that other layers implement
pub mod traits;
