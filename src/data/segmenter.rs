// ============================================================
// Layer 4 — Text Segmenter
// ============================================================
// Splits a document into passages small enough to be fed to
// the question-generation model.
//
// Unlike a fixed word window, passages here always end on a
// sentence boundary, so the model never sees half a sentence.
//
// Algorithm (greedy packing):
//   1. Split the document into sentences (UAX #29 sentence
//      bounds via unicode-segmentation).
//   2. Keep an accumulator, initially empty.
//   3. For each sentence: if accumulator words + sentence words
//      stay strictly below `max_words`, append it; otherwise
//      emit the accumulator as a passage and start a new one
//      with the current sentence.
//   4. Emit whatever is left at the end.
//
// Example with max_words = 5:
//   "Sentence one. Sentence two. Sentence three."
//   Passage 1: "Sentence one. Sentence two."   (4 words)
//   Passage 2: "Sentence three."               (2 words)
//
// A single sentence with max_words or more words cannot fit
// anywhere; it becomes its own oversized passage rather than
// being split or dropped.
//
// Reference: Rust Book §8 (Strings), §13 (Iterators)
//            unicode-segmentation crate documentation

use unicode_segmentation::UnicodeSegmentation;

use crate::domain::error::PipelineError;
use crate::domain::passage::{word_count, Passage};

pub struct TextSegmenter {
    /// Upper bound (exclusive) on words per passage
    max_words: usize,
}

impl TextSegmenter {
    /// Create a segmenter. `max_words` must be at least 1.
    pub fn new(max_words: usize) -> Result<Self, PipelineError> {
        if max_words == 0 {
            return Err(PipelineError::Config(
                "max_words must be greater than 0".to_string(),
            ));
        }
        Ok(Self { max_words })
    }

    /// Split `document` into ordered, non-overlapping passages.
    pub fn segment(&self, document: &str) -> Vec<Passage> {
        let mut passages: Vec<Passage> = Vec::new();
        let mut current  = String::new();
        let mut words    = 0usize;

        for sentence in sentences(document) {
            let sentence_words = word_count(sentence);

            if words + sentence_words < self.max_words {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(sentence);
                words += sentence_words;
            } else {
                // Never emit an empty passage: this branch is also hit
                // by an oversized first sentence
                if !current.is_empty() {
                    passages.push(Passage::new(passages.len(), current.as_str()));
                }
                if sentence_words >= self.max_words {
                    tracing::debug!(
                        "Sentence of {} words exceeds max_words={}, keeping it whole",
                        sentence_words,
                        self.max_words
                    );
                }
                current = sentence.to_string();
                words   = sentence_words;
            }
        }

        if !current.is_empty() {
            passages.push(Passage::new(passages.len(), current));
        }

        tracing::debug!(
            "Segmented {} words into {} passages (max_words={})",
            word_count(document),
            passages.len(),
            self.max_words
        );

        passages
    }
}

/// Sentence tokenizer: UAX #29 sentence bounds, trimmed,
/// whitespace-only pieces dropped. Covers all non-blank text.
pub fn sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split_sentence_bounds()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
