// ============================================================
// Layer 3 — Passage Domain Type
// ============================================================
// A passage is an ordered, contiguous run of sentences taken
// from the document. Passages are what the question-generation
// model sees as input, so their size is bounded by a maximum
// word count (see data::segmenter).
//
// Passages are created once per run, in document order, and
// never change afterwards. `index` is the passage's position
// in that order and is how questions point back to the
// passage they came from.

use serde::{Deserialize, Serialize};

/// A sentence-aligned chunk of document text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    /// Zero-based position of this passage in the document
    pub index: usize,

    /// The passage text, trimmed, sentences joined by single spaces
    pub text: String,

    /// Number of whitespace-separated words in `text`
    pub word_count: usize,
}

impl Passage {
    /// Build a passage, trimming the text and counting its words
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        let text       = text.into().trim().to_string();
        let word_count = word_count(&text);
        Self { index, text, word_count }
    }

    /// One-based number used in the human-readable report
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

/// Word count used everywhere in the pipeline: whitespace-separated tokens.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
