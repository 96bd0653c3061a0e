//! Literal and regex search/replace over a [`Buffer`].
//!
//! Searches run line by line; a match never spans a line break. Columns are
//! byte offsets. An empty pattern or a regex that fails to compile finds
//! nothing.

mod matcher;

use serde::{Deserialize, Serialize};

use self::matcher::Matcher;
use crate::text::Buffer;
use crate::util::end_position;

/// A single match within one line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchMatch {
    pub line: usize,
    pub col: usize,
    pub end_col: usize,
    pub length: usize,
}

impl SearchMatch {
    fn new(line: usize, (start, end): (usize, usize)) -> Self {
        Self {
            line,
            col: start,
            end_col: end,
            length: end - start,
        }
    }
}

/// How a pattern is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub case_sensitive: bool,
    pub regex: bool,
    pub whole_word: bool,
    /// Continue from the opposite end of the buffer when no match is found
    pub wrap_around: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            regex: false,
            whole_word: false,
            wrap_around: true,
        }
    }
}

/// Result of [`SearchEngine::replace_next`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Replacement {
    /// The match that was replaced, in pre-replacement coordinates
    pub replaced: SearchMatch,
    /// The next match after the inserted text, if any
    pub next: Option<SearchMatch>,
}

/// Search/replace operations plus the last-used pattern for "repeat search"
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    last_pattern: String,
    last_options: SearchOptions,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `options` as the remembered options
    pub fn with_options(options: SearchOptions) -> Self {
        Self {
            last_pattern: String::new(),
            last_options: options,
        }
    }

    pub fn last_pattern(&self) -> &str {
        &self.last_pattern
    }

    pub fn set_last_pattern(&mut self, pattern: impl Into<String>) {
        self.last_pattern = pattern.into();
    }

    pub fn last_options(&self) -> &SearchOptions {
        &self.last_options
    }

    pub fn set_last_options(&mut self, options: SearchOptions) {
        self.last_options = options;
    }

    // =========================================================================
    // Finding
    // =========================================================================

    /// First match at or after `(from_line, from_col)`, wrapping to the top
    /// of the buffer when enabled
    pub fn find_forward(
        &self,
        buf: &Buffer,
        pattern: &str,
        from_line: usize,
        from_col: usize,
        options: &SearchOptions,
    ) -> Option<SearchMatch> {
        let matcher = Matcher::new(pattern, options)?;
        forward(&matcher, buf, from_line, from_col, options)
    }

    /// Last match starting strictly before `(from_line, from_col)`, wrapping
    /// to the bottom of the buffer when enabled
    pub fn find_backward(
        &self,
        buf: &Buffer,
        pattern: &str,
        from_line: usize,
        from_col: usize,
        options: &SearchOptions,
    ) -> Option<SearchMatch> {
        let matcher = Matcher::new(pattern, options)?;
        let line_count = buf.line_count();
        let whole_word = options.whole_word;

        for line in (0..=from_line.min(line_count - 1)).rev() {
            let text = buf.line(line).unwrap_or("");
            let bound = if line == from_line { from_col } else { text.len() };
            if let Some(span) = matcher.last_between(text, 0, bound, whole_word) {
                return Some(SearchMatch::new(line, span));
            }
        }

        if options.wrap_around {
            for line in (from_line..line_count).rev() {
                let text = buf.line(line).unwrap_or("");
                let from = if line == from_line { from_col } else { 0 };
                if let Some(span) = matcher.last_between(text, from, text.len(), whole_word) {
                    return Some(SearchMatch::new(line, span));
                }
            }
        }
        None
    }

    /// Every non-overlapping match in the buffer, in document order
    pub fn find_all(&self, buf: &Buffer, pattern: &str, options: &SearchOptions) -> Vec<SearchMatch> {
        let Some(matcher) = Matcher::new(pattern, options) else {
            return Vec::new();
        };
        all_matches(&matcher, buf, options)
    }

    pub fn count_matches(&self, buf: &Buffer, pattern: &str, options: &SearchOptions) -> usize {
        self.find_all(buf, pattern, options).len()
    }

    /// Search forward again with the remembered pattern and options
    pub fn repeat_forward(&self, buf: &Buffer, from_line: usize, from_col: usize) -> Option<SearchMatch> {
        self.find_forward(buf, &self.last_pattern, from_line, from_col, &self.last_options)
    }

    /// Search backward again with the remembered pattern and options
    pub fn repeat_backward(&self, buf: &Buffer, from_line: usize, from_col: usize) -> Option<SearchMatch> {
        self.find_backward(buf, &self.last_pattern, from_line, from_col, &self.last_options)
    }

    // =========================================================================
    // Replacing
    // =========================================================================

    /// Replace the next match at or after `(from_line, from_col)`.
    ///
    /// Only the matched span is rewritten. The returned `next` match is
    /// searched from just past the inserted text.
    pub fn replace_next(
        &self,
        buf: &mut Buffer,
        pattern: &str,
        replacement: &str,
        from_line: usize,
        from_col: usize,
        options: &SearchOptions,
    ) -> Option<Replacement> {
        let matcher = Matcher::new(pattern, options)?;
        let current = forward(&matcher, buf, from_line, from_col, options)?;

        let text = matcher.replacement_for(
            &buf.get_line(current.line),
            current.col,
            current.end_col,
            replacement,
        );
        buf.delete_range(current.line, current.col, current.line, current.end_col);
        buf.insert_text(current.line, current.col, &text);

        let (line, col) = end_position(current.line, current.col, &text);
        Some(Replacement {
            replaced: current,
            next: forward(&matcher, buf, line, col, options),
        })
    }

    /// Replace every match, returning how many were replaced.
    ///
    /// Replacement strings are computed against the unmodified text, then
    /// applied from the last match to the first so stored offsets stay valid.
    pub fn replace_all(
        &self,
        buf: &mut Buffer,
        pattern: &str,
        replacement: &str,
        options: &SearchOptions,
    ) -> usize {
        let Some(matcher) = Matcher::new(pattern, options) else {
            return 0;
        };
        let matches = all_matches(&matcher, buf, options);
        let texts: Vec<String> = matches
            .iter()
            .map(|m| matcher.replacement_for(&buf.get_line(m.line), m.col, m.end_col, replacement))
            .collect();

        for (m, text) in matches.iter().zip(&texts).rev() {
            buf.delete_range(m.line, m.col, m.line, m.end_col);
            buf.insert_text(m.line, m.col, text);
        }

        tracing::debug!(pattern, count = matches.len(), "replace all");
        matches.len()
    }
}

fn forward(
    matcher: &Matcher,
    buf: &Buffer,
    from_line: usize,
    from_col: usize,
    options: &SearchOptions,
) -> Option<SearchMatch> {
    let line_count = buf.line_count();
    let whole_word = options.whole_word;

    for line in from_line..line_count {
        let text = buf.line(line).unwrap_or("");
        let from = if line == from_line { from_col } else { 0 };
        if let Some(span) = matcher.find_from(text, from, whole_word) {
            return Some(SearchMatch::new(line, span));
        }
    }

    if options.wrap_around {
        for line in 0..=from_line.min(line_count - 1) {
            let text = buf.line(line).unwrap_or("");
            let limit = if line == from_line { from_col } else { text.len() + 1 };
            if let Some(span) = matcher.find_from(text, 0, whole_word) {
                if span.0 < limit {
                    return Some(SearchMatch::new(line, span));
                }
            }
        }
    }
    None
}

fn all_matches(matcher: &Matcher, buf: &Buffer, options: &SearchOptions) -> Vec<SearchMatch> {
    (0..buf.line_count())
        .flat_map(|line| {
            let text = buf.line(line).unwrap_or("");
            matcher
                .matches_in(text, options.whole_word)
                .into_iter()
                .map(move |span| SearchMatch::new(line, span))
        })
        .collect()
}
