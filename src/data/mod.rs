// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from the input file up to the passages the
// models will see:
//
//   .pdf / .docx / .txt
//       │
//       ▼
//   Loader         → extracts raw text (lopdf, docx-rs)
//       │
//       ▼
//   Preprocessor   → cleans layout debris, fixes hyphenation
//       │
//       ▼
//   Document
//       │
//       ▼
//   TextSegmenter  → sentence-aligned passages below max_words
//
// Each module does exactly one step and is tested on its own.
//
// Reference: Rust Book §8 (Strings), §13 (Iterators)

/// PDF / DOCX / text loaders implementing DocumentSource
pub mod loader;

/// Cleans and normalises extracted text
pub mod preprocessor;

/// Greedy sentence packing into bounded passages
pub mod segmenter;
