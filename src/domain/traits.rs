// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The pipeline core never talks to a PDF library or an HTTP
// endpoint directly. It talks to these traits, and the data
// and infrastructure layers provide the implementations:
//
//   DocumentSource             ← PdfLoader / DocxLoader / TextLoader
//   TextGenerationService      ← InferenceClient (text2text models)
//   QuestionGenerator          ← PromptedQuestionGenerator
//   QuestionAnsweringService   ← InferenceClient (extractive QA model)
//
// Tests swap in scripted fakes for the services, which keeps
// the segmentation and aggregation logic testable offline.
//
// All calls are blocking: one passage is fully processed
// before the next one starts.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::document::Document;
use crate::domain::question::Answer;

// ─── DocumentSource ───────────────────────────────────────────────────────────
/// Any component that can turn an input file into a Document.
pub trait DocumentSource {
    /// Load the document. An input with no usable text is an
    /// `Extraction` error, never an empty Document.
    fn load(&self) -> Result<Document>;
}

// ─── TextGenerationService ────────────────────────────────────────────────────
/// Sampling/length options forwarded to a text-generation model.
/// `None` lengths are left to the model's defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    pub do_sample: bool,
}

/// A text-to-text model (summarisation, question generation).
pub trait TextGenerationService {
    /// Send `prompt` to the model and return its generated text.
    fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<String>;
}

// ─── QuestionGenerator ────────────────────────────────────────────────────────
/// Produces one block of generated text holding several
/// questions packed together with `separator()`.
pub trait QuestionGenerator {
    fn generate(&self, text: &str) -> Result<String>;

    /// Token the model uses between questions
    fn separator(&self) -> &str {
        "<sep>"
    }
}

// ─── QuestionAnsweringService ─────────────────────────────────────────────────
/// An extractive question-answering model.
pub trait QuestionAnsweringService {
    /// Answer `question` using `context` as the only source.
    fn answer(&self, question: &str, context: &str) -> Result<Answer>;
}
