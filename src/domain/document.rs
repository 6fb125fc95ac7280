// ============================================================
// Layer 3 — Document Domain Type
// ============================================================
// The single immutable piece of text a pipeline run works on.
// No structure is assumed beyond its characters: the loader
// has already turned the PDF/DOCX bytes into plain text and
// the preprocessor has normalised its whitespace.

use serde::{Deserialize, Serialize};

/// The extracted text of one input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// The file name the text came from, kept for the report header
    pub source: String,

    /// The full extracted text
    pub text: String,
}

impl Document {
    /// Create a new Document from a source label and its text.
    ///
    /// Example:
    ///   let doc = Document::new("terms.pdf", "These terms apply...");
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text:   text.into(),
        }
    }

    /// True when the document holds nothing but whitespace
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Number of whitespace-separated words in the document
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}
