// ============================================================
// Layer 1 — Text Report
// ============================================================
// Renders PipelineEvents as the human-readable report:
//
//   Document: terms.pdf (4210 words)
//   Summary: ...
//
//   Passage 1:
//   <passage text>
//
//   Generated Questions:
//   - What do the terms cover?
//   - Who provides the services? (duplicate)
//   --------------------------------------------------
//
//   Answers:
//   Q: What do the terms cover?
//   A: your use of Google services (confidence 0.87)
//   ==================================================
//
// Rendering is separate from printing so the layout can be
// unit tested.

use crate::application::pipeline_use_case::{PipelineEvent, PipelineOutcome};

const PASSAGE_RULE: usize = 50;
const FINAL_RULE: usize = 50;

#[derive(Default)]
pub struct Report {
    answers_started: bool,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text to print for one event, if any.
    pub fn render(&mut self, event: &PipelineEvent<'_>) -> Option<String> {
        match event {
            PipelineEvent::Loaded(doc) => Some(format!(
                "Document: {} ({} words)\n",
                doc.source,
                doc.word_count()
            )),

            PipelineEvent::Summary(summary) => Some(format!("Summary: {summary}\n")),

            PipelineEvent::Segmented(_) => None,

            PipelineEvent::Passage { passage, questions } => {
                let mut out = format!("\nPassage {}:\n{}\n\nGenerated Questions:\n", passage.number(), passage.text);
                if questions.candidates.is_empty() {
                    out.push_str("(none)\n");
                }
                for (q, duplicate) in questions.marked() {
                    if duplicate {
                        out.push_str(&format!("- {q} (duplicate)\n"));
                    } else {
                        out.push_str(&format!("- {q}\n"));
                    }
                }
                out.push_str(&"-".repeat(PASSAGE_RULE));
                out.push('\n');
                Some(out)
            }

            PipelineEvent::Answered(aq) => {
                let mut out = String::new();
                if !self.answers_started {
                    self.answers_started = true;
                    out.push_str("\nAnswers:\n");
                }
                out.push_str(&format!("Q: {}\n", aq.question.text));
                match aq.answer.confidence {
                    Some(c) => out.push_str(&format!("A: {} (confidence {:.2})\n\n", aq.answer.text, c)),
                    None    => out.push_str(&format!("A: {}\n\n", aq.answer.text)),
                }
                Some(out)
            }
        }
    }

    /// Closing lines once the run has finished.
    pub fn finish(&self, outcome: &PipelineOutcome) -> String {
        format!(
            "{}\n{} passages, {} unique questions, {} answered\n",
            "=".repeat(FINAL_RULE),
            outcome.passages.len(),
            outcome.unique.len(),
            outcome.answered.len()
        )
    }
}
