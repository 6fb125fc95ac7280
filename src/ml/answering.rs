// ============================================================
// Layer 5 — Answer Stage
// ============================================================
// Answers each unique question once, using the passage that
// first produced it as the QA model's context.
//
// The aggregator already guarantees uniqueness, but this stage
// keeps its own record of what it has answered: asking it
// again about a question it has seen returns the stored answer
// without calling the service. Running the stage twice over
// the same list therefore gives identical answers and never
// issues a second call for the same question string.

use anyhow::{anyhow, Context, Result};
use std::collections::{HashMap, HashSet};

use crate::domain::passage::Passage;
use crate::domain::question::{Answer, AnsweredQuestion, Question};
use crate::domain::traits::QuestionAnsweringService;

#[derive(Default)]
pub struct AnswerStage {
    answered: HashMap<String, Answer>,
}

impl AnswerStage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_answered(&self, question: &str) -> bool {
        self.answered.contains_key(question)
    }

    /// Number of distinct questions answered so far
    pub fn answered_count(&self) -> usize {
        self.answered.len()
    }

    /// Answer one question against `context`, or return the stored
    /// answer if this question string was answered before.
    pub fn answer_question<S>(
        &mut self,
        question: &Question,
        context:  &str,
        service:  &S,
    ) -> Result<AnsweredQuestion>
    where
        S: QuestionAnsweringService + ?Sized,
    {
        if let Some(answer) = self.answered.get(&question.text) {
            tracing::debug!("Already answered '{}'", question.text);
            return Ok(AnsweredQuestion::new(question.clone(), answer.clone()));
        }

        let answer = service
            .answer(&question.text, context)
            .with_context(|| format!("answering '{}' failed", question.text))?;

        tracing::debug!(
            "Q: '{}' → A: '{}' (confidence {:?})",
            question.text,
            answer.text,
            answer.confidence
        );

        self.answered.insert(question.text.clone(), answer.clone());
        Ok(AnsweredQuestion::new(question.clone(), answer))
    }

    /// Batch API: answer every question and collect the pairs.
    pub fn answer_all<S>(
        &mut self,
        questions: &[Question],
        passages:  &[Passage],
        service:   &S,
    ) -> Result<Vec<AnsweredQuestion>>
    where
        S: QuestionAnsweringService + ?Sized,
    {
        self.answer_each(questions, passages, service, |_| {})
    }

    /// Answer every question in order, looking up each one's source
    /// passage for context. Repeated strings in `questions` yield a
    /// single pair. `on_pair` sees each pair as soon as it exists,
    /// so a later failure does not hide earlier answers.
    pub fn answer_each<S, F>(
        &mut self,
        questions:   &[Question],
        passages:    &[Passage],
        service:     &S,
        mut on_pair: F,
    ) -> Result<Vec<AnsweredQuestion>>
    where
        S: QuestionAnsweringService + ?Sized,
        F: FnMut(&AnsweredQuestion),
    {
        let mut emitted = HashSet::new();
        let mut pairs   = Vec::with_capacity(questions.len());

        for question in questions {
            if !emitted.insert(question.text.as_str()) {
                continue;
            }
            let context  = context_for(question, passages)?;
            let answered = self.answer_question(question, context, service)?;
            on_pair(&answered);
            pairs.push(answered);
        }

        Ok(pairs)
    }
}

/// The text of the passage a question came from.
pub fn context_for<'p>(question: &Question, passages: &'p [Passage]) -> Result<&'p str> {
    passages
        .get(question.passage_index)
        .map(|p| p.text.as_str())
        .ok_or_else(|| {
            anyhow!(
                "question '{}' points at missing passage {}",
                question.text,
                question.passage_index
            )
        })
}
