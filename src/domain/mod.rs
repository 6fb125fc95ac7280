// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits describing what the
// quiz pipeline works with:
//
//   Document  → the extracted text of one input file
//   Passage   → a sentence-aligned, word-bounded slice of it
//   Question  → a generated question tagged with its passage
//   AnsweredQuestion → a question paired with its answer
//
// Rules for this layer:
//   - NO HTTP, PDF or DOCX types allowed here
//   - NO file I/O or network calls
//   - Only plain Rust data, errors and the service traits
//     that the infrastructure layer implements
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// The extracted text of one input file
pub mod document;

// Passages produced by the segmenter
pub mod passage;

// Generated and answered questions
pub mod question;

// Typed pipeline errors
pub mod error;

// Abstractions over the external model services
pub mod traits;
