// ============================================================
// Layer 5 — Question Parser
// ============================================================
// Question-generation models pack several questions into one
// generated string, separated by a model-specific token:
//
//   "What is X? <sep> Who owns Y? <sep>"
//        → ["What is X?", "Who owns Y?"]
//
// Each piece is trimmed and empty pieces (typically the one
// after a trailing separator) are dropped. A response with no
// usable pieces parses to an empty Vec — that is not an error.

/// Split a generated block into candidate question strings.
pub fn parse_questions(raw: &str, separator: &str) -> Vec<String> {
    if separator.is_empty() {
        let q = raw.trim();
        return if q.is_empty() { Vec::new() } else { vec![q.to_string()] };
    }

    raw.split(separator)
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_string)
        .collect()
}
