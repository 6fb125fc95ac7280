// ============================================================
// Layer 5 — Question Aggregator
// ============================================================
// Drives the question generator over every passage and turns
// its raw output into one deduplicated list of questions for
// the whole document.
//
// Per passage:
//   1. Ask the generator for questions on the full passage and
//      split the result on the separator token.
//   2. Below quota? Re-query on fallback windows of two
//      consecutive sub-units (see ml::fallback) until the
//      quota is met or the windows run out.
//   3. Keep exactly the first `min_per_passage` candidates.
//
// Across passages:
//   One `seen` set lives for the whole document run. A
//   candidate whose exact string was already emitted by an
//   earlier passage is skipped, so every question is
//   attributed to the first passage that produced it.
//
// An empty generator response is not an error. Running out of
// windows while under quota just leaves the passage with fewer
// questions. Service failures propagate to the caller.

use anyhow::{Context, Result};
use std::collections::HashSet;

use crate::domain::passage::Passage;
use crate::domain::question::{PassageQuestions, Question};
use crate::domain::traits::QuestionGenerator;
use crate::ml::fallback::FallbackWindows;
use crate::ml::question_parser::parse_questions;

pub struct QuestionAggregator {
    /// Quota per passage; also the cap after truncation
    min_per_passage: usize,

    /// Every question string emitted so far in this document
    seen: HashSet<String>,
}

impl QuestionAggregator {
    pub fn new(min_per_passage: usize) -> Self {
        Self {
            min_per_passage,
            seen: HashSet::new(),
        }
    }

    /// Number of unique questions emitted so far
    pub fn unique_count(&self) -> usize {
        self.seen.len()
    }

    /// Batch API: run the whole document and return only the unique
    /// questions, in first-seen order.
    pub fn generate_unique_questions<G>(
        &mut self,
        passages:  &[Passage],
        generator: &G,
    ) -> Result<Vec<Question>>
    where
        G: QuestionGenerator + ?Sized,
    {
        let per_passage = self.generate_each(passages, generator, |_, _| {})?;
        Ok(per_passage.into_iter().flat_map(|pq| pq.fresh).collect())
    }

    /// Run every passage in order against one shared dedup set,
    /// handing each result to `on_passage` as soon as it is ready.
    pub fn generate_each<G, F>(
        &mut self,
        passages:       &[Passage],
        generator:      &G,
        mut on_passage: F,
    ) -> Result<Vec<PassageQuestions>>
    where
        G: QuestionGenerator + ?Sized,
        F: FnMut(&Passage, &PassageQuestions),
    {
        let mut results = Vec::with_capacity(passages.len());
        for passage in passages {
            let result = self.aggregate_passage(passage, generator)?;
            on_passage(passage, &result);
            results.push(result);
        }
        Ok(results)
    }

    /// Generate, truncate and deduplicate questions for one passage.
    pub fn aggregate_passage<G>(
        &mut self,
        passage:   &Passage,
        generator: &G,
    ) -> Result<PassageQuestions>
    where
        G: QuestionGenerator + ?Sized,
    {
        let candidates = self.candidates_for(passage, generator)?;

        let mut fresh = Vec::new();
        for candidate in &candidates {
            // insert() is false when the string was already emitted
            if self.seen.insert(candidate.clone()) {
                fresh.push(Question::new(candidate.as_str(), passage.index));
            } else {
                tracing::debug!(
                    "Passage {}: skipping duplicate question '{}'",
                    passage.number(),
                    candidate
                );
            }
        }

        tracing::info!(
            "Passage {}: {} candidates, {} new",
            passage.number(),
            candidates.len(),
            fresh.len()
        );

        Ok(PassageQuestions {
            passage_index: passage.index,
            candidates,
            fresh,
        })
    }

    /// Steps 1–3 for a single passage: primary call, fallback
    /// windows while under quota, truncation to the quota.
    pub fn candidates_for<G>(&self, passage: &Passage, generator: &G) -> Result<Vec<String>>
    where
        G: QuestionGenerator + ?Sized,
    {
        let separator = generator.separator();

        let raw = generator
            .generate(&passage.text)
            .with_context(|| format!("question generation failed for passage {}", passage.number()))?;
        let mut questions = parse_questions(&raw, separator);

        if questions.is_empty() {
            tracing::debug!("Passage {}: primary call gave no questions", passage.number());
        }

        if questions.len() < self.min_per_passage {
            let mut windows = FallbackWindows::new(&passage.text);

            while questions.len() < self.min_per_passage {
                let Some(window) = windows.next() else {
                    tracing::debug!(
                        "Passage {}: fallback exhausted with {}/{} questions",
                        passage.number(),
                        questions.len(),
                        self.min_per_passage
                    );
                    break;
                };

                tracing::debug!("Passage {}: fallback window '{}'", passage.number(), window);

                let raw = generator.generate(&window).with_context(|| {
                    format!("fallback generation failed for passage {}", passage.number())
                })?;
                questions.extend(parse_questions(&raw, separator));
            }
        }

        questions.truncate(self.min_per_passage);
        Ok(questions)
    }
}
