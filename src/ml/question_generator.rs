// ============================================================
// Layer 5 — Prompted Question Generator
// ============================================================
// Adapts a generic text-to-text service into a
// QuestionGenerator by prefixing the task prompt the model was
// fine-tuned on ("generate questions: {passage}") and
// reporting the separator token it packs questions with.

use anyhow::Result;

use crate::domain::traits::{GenerationOptions, QuestionGenerator, TextGenerationService};

pub const DEFAULT_PROMPT_PREFIX: &str = "generate questions: ";
pub const DEFAULT_SEPARATOR: &str = "<sep>";

pub struct PromptedQuestionGenerator<S> {
    service:   S,
    prefix:    String,
    separator: String,
    options:   GenerationOptions,
}

impl<S: TextGenerationService> PromptedQuestionGenerator<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            prefix:    DEFAULT_PROMPT_PREFIX.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
            options:   GenerationOptions::default(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

impl<S: TextGenerationService> QuestionGenerator for PromptedQuestionGenerator<S> {
    fn generate(&self, text: &str) -> Result<String> {
        let prompt = format!("{}{}", self.prefix, text);
        self.service.generate(&prompt, &self.options)
    }

    fn separator(&self) -> &str {
        &self.separator
    }
}
