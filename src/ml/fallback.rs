// ============================================================
// Layer 5 — Fallback Windows
// ============================================================
// When the model returns fewer questions for a passage than
// the quota asks for, the aggregator re-queries it on smaller
// pieces of the same passage.
//
// The passage is cut into coarse sub-units at sentence
// terminators ('.', '?', '!' followed by whitespace), then
// windows of two consecutive units are produced in order:
//
//   units:   [A, B, C, D]
//   windows: "A B", "B C", "C D", "D"
//
// There is one window per unit; the last one holds a single
// unit. The iterator is lazy, so the aggregator stops asking
// for windows as soon as the quota is met, and Clone/restart
// give a fresh pass over the same passage.

/// Number of consecutive sub-units per window
pub const WINDOW_UNITS: usize = 2;

#[derive(Debug, Clone)]
pub struct FallbackWindows<'a> {
    units: Vec<&'a str>,
    next:  usize,
}

impl<'a> FallbackWindows<'a> {
    pub fn new(passage: &'a str) -> Self {
        Self {
            units: sub_units(passage),
            next:  0,
        }
    }

    /// Rewind to the first window
    pub fn restart(&mut self) {
        self.next = 0;
    }

    /// Total number of windows this passage yields
    pub fn window_count(&self) -> usize {
        self.units.len()
    }
}

impl Iterator for FallbackWindows<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.next >= self.units.len() {
            return None;
        }
        let end    = (self.next + WINDOW_UNITS).min(self.units.len());
        let window = self.units[self.next..end].join(" ");
        self.next += 1;
        Some(window)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.units.len().saturating_sub(self.next);
        (left, Some(left))
    }
}

/// Cut `text` after every sentence terminator that is followed by
/// whitespace. Units are trimmed; blank units are dropped.
pub fn sub_units(text: &str) -> Vec<&str> {
    let mut units = Vec::new();
    let mut start = 0usize;
    let mut chars = text.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if matches!(c, '.' | '?' | '!') {
            if let Some(&(next_idx, next)) = chars.peek() {
                if next.is_whitespace() {
                    units.push(&text[start..next_idx]);
                    start = next_idx;
                }
            }
        }
    }
    units.push(&text[start..]);

    units
        .into_iter()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .collect()
}
