// Scripted stand-ins for the external model services, shared by
// the unit tests of this layer and the application layer.

use anyhow::Result;
use std::cell::RefCell;
use std::collections::HashMap;

use crate::domain::error::PipelineError;
use crate::domain::question::Answer;
use crate::domain::traits::{
    GenerationOptions, QuestionAnsweringService, QuestionGenerator, TextGenerationService,
};

/// Returns a fixed response per input text ("" for unknown inputs)
/// and records every call.
#[derive(Default)]
pub struct ScriptedGenerator {
    responses: HashMap<String, String>,
    pub calls: RefCell<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, input: &str, output: &str) -> Self {
        self.responses.insert(input.to_string(), output.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl QuestionGenerator for ScriptedGenerator {
    fn generate(&self, text: &str) -> Result<String> {
        self.calls.borrow_mut().push(text.to_string());
        Ok(self.responses.get(text).cloned().unwrap_or_default())
    }
}

impl TextGenerationService for ScriptedGenerator {
    fn generate(&self, prompt: &str, _options: &GenerationOptions) -> Result<String> {
        QuestionGenerator::generate(self, prompt)
    }
}

/// Fails every call the way an unreachable endpoint would.
pub struct DownService;

impl QuestionGenerator for DownService {
    fn generate(&self, _text: &str) -> Result<String> {
        Err(PipelineError::service("question-generation", "connection refused").into())
    }
}

impl QuestionAnsweringService for DownService {
    fn answer(&self, _question: &str, _context: &str) -> Result<Answer> {
        Err(PipelineError::service("question-answering", "connection refused").into())
    }
}

/// Answers deterministically with "<question> @ <first word of context>".
#[derive(Default)]
pub struct EchoAnswerer {
    pub calls: RefCell<Vec<(String, String)>>,
}

impl EchoAnswerer {
    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl QuestionAnsweringService for EchoAnswerer {
    fn answer(&self, question: &str, context: &str) -> Result<Answer> {
        self.calls
            .borrow_mut()
            .push((question.to_string(), context.to_string()));
        let first = context.split_whitespace().next().unwrap_or_default();
        Ok(Answer::new(format!("{question} @ {first}"), Some(0.5)))
    }
}
