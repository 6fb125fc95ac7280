// ============================================================
// Layer 3 — Question Domain Types
// ============================================================
// A Question is a generated question string tagged with the
// passage it originated from. Two questions are "the same"
// only if their strings are exactly equal — no case folding,
// no whitespace normalisation beyond the trim applied when the
// generator output is parsed.
//
// An AnsweredQuestion is created at most once per unique
// question string for a whole document run.
//
// Example:
//   Question:  "What do the terms cover?"  (from passage 2)
//   Answer:    "your use of Google services"
//
// Reference: Rust Book §5 (Structs)

use serde::{Deserialize, Serialize};

/// A generated question and the passage that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Question {
    /// The question text exactly as parsed from the generator output
    pub text: String,

    /// Index of the passage that first produced this question
    pub passage_index: usize,
}

impl Question {
    pub fn new(text: impl Into<String>, passage_index: usize) -> Self {
        Self {
            text: text.into(),
            passage_index,
        }
    }
}

/// The answer returned by the question-answering service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// The extracted answer span
    pub text: String,

    /// Model confidence, when the service reports one
    pub confidence: Option<f32>,
}

impl Answer {
    pub fn new(text: impl Into<String>, confidence: Option<f32>) -> Self {
        Self {
            text: text.into(),
            confidence,
        }
    }
}

/// A unique question paired with its answer and source passage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnsweredQuestion {
    pub question: Question,
    pub answer:   Answer,
}

impl AnsweredQuestion {
    pub fn new(question: Question, answer: Answer) -> Self {
        Self { question, answer }
    }

    /// Index of the passage used as answering context
    pub fn passage_index(&self) -> usize {
        self.question.passage_index
    }
}

/// What the aggregator produced for one passage.
///
/// `candidates` is the quota-truncated list in generation order,
/// `fresh` the subset that no earlier passage had produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassageQuestions {
    pub passage_index: usize,
    pub candidates:    Vec<String>,
    pub fresh:         Vec<Question>,
}

impl PassageQuestions {
    /// Candidates paired with a duplicate flag, in generation order.
    ///
    /// `fresh` follows the order of first occurrence in `candidates`,
    /// so walking both lists together flags repeats by position: a
    /// string repeated inside this passage is new the first time and
    /// a duplicate every time after.
    pub fn marked(&self) -> Vec<(&str, bool)> {
        let mut fresh = self.fresh.iter().peekable();
        self.candidates
            .iter()
            .map(|candidate| {
                let is_new = fresh.next_if(|q| q.text == *candidate).is_some();
                (candidate.as_str(), !is_new)
            })
            .collect()
    }
}
