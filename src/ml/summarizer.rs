// ============================================================
// Layer 5 — Summarizer
// ============================================================
// Produces a short summary of the document's opening text
// through a text-to-text model. Only the head of the document
// is sent (`input_chars` characters) since small summarisation
// models cannot take a whole PDF as input.

use anyhow::{Context, Result};

use crate::domain::traits::{GenerationOptions, TextGenerationService};

pub const DEFAULT_INPUT_CHARS: usize = 1000;
pub const DEFAULT_MAX_LENGTH: usize = 150;
pub const DEFAULT_MIN_LENGTH: usize = 30;

#[derive(Debug, Clone)]
pub struct Summarizer {
    options:     GenerationOptions,
    input_chars: usize,
}

impl Summarizer {
    pub fn new(max_length: usize, min_length: usize, input_chars: usize) -> Self {
        Self {
            options: GenerationOptions {
                max_length: Some(max_length),
                min_length: Some(min_length),
                do_sample:  false,
            },
            input_chars,
        }
    }

    /// Summarise the first `input_chars` characters of `text`.
    pub fn summarize<S>(&self, service: &S, text: &str) -> Result<String>
    where
        S: TextGenerationService + ?Sized,
    {
        let head = head_chars(text, self.input_chars);
        let summary = service
            .generate(head, &self.options)
            .context("summarisation failed")?;
        Ok(summary.trim().to_string())
    }
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH, DEFAULT_INPUT_CHARS)
    }
}

/// The first `n` characters of `text`, never splitting a char.
fn head_chars(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::testing::ScriptedGenerator;

    #[test]
    fn test_head_chars_respects_char_boundaries() {
        assert_eq!(head_chars("héllo", 2), "hé");
        assert_eq!(head_chars("abc", 10), "abc");
        assert_eq!(head_chars("", 3), "");
    }

    #[test]
    fn test_only_the_head_is_sent() {
        let service = ScriptedGenerator::new().respond("abcde", "  A summary.  ");
        let s       = Summarizer::new(150, 30, 5);

        let summary = s.summarize(&service, "abcdefghij").unwrap();
        assert_eq!(summary, "A summary.");
        assert_eq!(service.calls.borrow()[0], "abcde");
    }

    #[test]
    fn test_default_options() {
        let s = Summarizer::default();
        assert_eq!(s.options.max_length, Some(150));
        assert_eq!(s.options.min_length, Some(30));
        assert!(!s.options.do_sample);
    }
}
