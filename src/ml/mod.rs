// ============================================================
// Layer 5 — Question Generation & Answering Logic
// ============================================================
// Everything that sits between the passages and the external
// model services lives here. The services themselves are only
// seen through the domain traits, so this layer never touches
// HTTP.
//
//   question_parser.rs    — splits a generated block on the
//                           separator token
//   fallback.rs           — lazy sliding windows over a passage
//                           for re-querying under quota
//   question_generator.rs — prompt prefix adapter over a
//                           text-to-text service
//   aggregator.rs         — per-passage quota, truncation and
//                           document-wide deduplication
//   answering.rs          — answers each unique question once
//   summarizer.rs         — summary of the document head
//
// Reference: Rust Book §10 (Generic Types, Traits)
//            Rust Book §13 (Iterators)

pub mod question_parser;

pub mod fallback;

pub mod question_generator;

pub mod aggregator;

pub mod answering;

pub mod summarizer;

#[cfg(test)]
pub mod testing;
