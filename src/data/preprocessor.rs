// ============================================================
// Layer 4 — Text Preprocessor
// ============================================================
// Cleans raw text coming out of the PDF/DOCX extractors before
// it becomes the pipeline's Document.
//
// PDF text extraction leaves a lot of layout debris behind:
//   - Non-breaking spaces and tabs from justified text
//   - Soft hyphens and zero-width characters
//   - Form feeds between pages, Windows line endings
//   - Words hyphenated across line breaks ("agree-\nment")
//   - Runs of spaces from column alignment
//
// Left in, these confuse the sentence splitter and inflate
// word counts, so passages end up smaller than they should.
//
// Cleaning steps (applied in order):
//   1. Normalise line endings and page breaks to '\n'
//   2. Map whitespace look-alikes to a plain space, drop
//      invisible characters
//   3. Collapse whitespace runs inside each line
//   4. Re-join words split by an end-of-line hyphen
//   5. Unwrap lines inside a paragraph with a single space
//   6. Keep exactly one blank line between paragraphs
//
// Step 5 matters for the segmenter: UAX #29 always breaks a
// sentence after a line feed, so a PDF line wrap left in place
// would cut a sentence in two.
//
// Reference: Rust Book §8 (Strings in Rust)
//            Rust Book §13 (Iterators)

pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Clean extracted text. Returns an owned, trimmed String.
    pub fn clean(&self, text: &str) -> String {
        // ── Steps 1 + 2: character-level normalisation ───────────────────────
        let normalised: String = text
            .replace("\r\n", "\n")
            .chars()
            .filter_map(|c| match c {
                // Page and line breaks
                '\r' | '\u{000C}' => Some('\n'),
                // Whitespace look-alikes
                '\t' | '\u{00A0}' | '\u{2007}' | '\u{202F}' => Some(' '),
                // Invisible characters carry no text
                '\u{00AD}' | '\u{200B}' | '\u{FEFF}' => None,
                c if c.is_control() && c != '\n' => Some(' '),
                c => Some(c),
            })
            .collect();

        // ── Steps 3–6: line-level clean-up ───────────────────────────────────
        let mut out       = String::with_capacity(normalised.len());
        let mut blank_run = 0usize;

        for raw_line in normalised.lines() {
            let line = raw_line.split_whitespace().collect::<Vec<_>>().join(" ");

            if line.is_empty() {
                blank_run += 1;
                continue;
            }

            if out.is_empty() {
                out.push_str(&line);
            } else if blank_run == 0 && ends_with_split_word(&out) && starts_lowercase(&line) {
                // "agree-" + "ment continues" → "agreement continues"
                out.pop();
                out.push_str(&line);
            } else {
                out.push_str(if blank_run > 0 { "\n\n" } else { " " });
                out.push_str(&line);
            }

            blank_run = 0;
        }

        out
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

/// True when `text` ends in a letter followed by a hyphen
fn ends_with_split_word(text: &str) -> bool {
    let mut rev = text.chars().rev();
    rev.next() == Some('-') && rev.next().is_some_and(char::is_alphabetic)
}

fn starts_lowercase(line: &str) -> bool {
    line.chars().next().is_some_and(char::is_lowercase)
}
