//! Line model for range edits
//!
//! A file is a list of lines split on `\n` plus a flag for the final newline.
//! The final newline is not part of any line, so replacing the last line of a
//! file keeps it. An empty file is a single empty line.

/// Longest scroll hint, in characters
const SCROLL_HINT_MAX_CHARS: usize = 80;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
    trailing_newline: bool,
}

impl LineBuffer {
    pub fn parse(content: &str) -> Self {
        let (body, trailing_newline) = match content.strip_suffix('\n') {
            Some(body) => (body, true),
            None => (content, false),
        };

        Self {
            lines: body.split('\n').map(String::from).collect(),
            trailing_newline,
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines `start..start + count` (1-based `start`) joined with `\n`
    pub fn range_text(&self, start: usize, count: usize) -> String {
        self.lines[start - 1..start - 1 + count].join("\n")
    }

    /// Replace `count` lines starting at 1-based `start` with `replacement`.
    ///
    /// `count == 0` inserts before `start`. Callers check bounds.
    pub fn splice(&mut self, start: usize, count: usize, replacement: Vec<String>) {
        let from = start - 1;
        self.lines.splice(from..from + count, replacement);
    }

    /// Whether `count` lines starting at `start` lie inside the buffer.
    ///
    /// An empty range may sit one past the last line.
    pub fn contains_range(&self, start: usize, count: usize) -> bool {
        start >= 1 && start - 1 + count <= self.lines.len()
    }

    pub fn render(&self) -> String {
        if self.lines.is_empty() {
            return String::new();
        }

        let mut out = self.lines.join("\n");
        if self.trailing_newline {
            out.push('\n');
        }
        out
    }
}

/// Split caller-supplied replacement text into lines.
///
/// Empty text is zero lines. One trailing `\n` is ignored, so `"a\n"` and
/// `"a"` are both the single line `a`.
pub fn split_block(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let body = text.strip_suffix('\n').unwrap_or(text);
    body.split('\n').map(String::from).collect()
}

/// Lines of a block recorded in an event as `text` + `line_count`.
///
/// Returns `None` if the two disagree.
pub fn block_lines(text: &str, line_count: usize) -> Option<Vec<String>> {
    if line_count == 0 {
        return text.is_empty().then(Vec::new);
    }

    let lines: Vec<String> = text.split('\n').map(String::from).collect();
    (lines.len() == line_count).then_some(lines)
}

/// Short label for the first meaningful line of `lines`, for UI auto-scroll
pub fn scroll_hint(lines: &[String]) -> Option<String> {
    let line = lines
        .iter()
        .map(|l| l.trim())
        .find(|l| !l.is_empty())
        .or_else(|| lines.first().map(|l| l.trim()))?;

    Some(line.chars().take(SCROLL_HINT_MAX_CHARS).collect())
}
