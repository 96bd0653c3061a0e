//! Per-line pattern matching shared by every search operation.

use regex::{Regex, RegexBuilder};

use super::SearchOptions;
use crate::util::{ceil_char_boundary, is_word_boundary, next_char_boundary};

/// A compiled search pattern
#[derive(Debug, Clone)]
pub(crate) enum Matcher {
    /// Case-sensitive literal text
    Literal(String),
    /// Case-insensitive literal text, matched through an escaped regex so
    /// Unicode case folding keeps byte offsets exact
    Folded(Regex),
    /// User regex; replacements may reference capture groups
    Pattern(Regex),
}

impl Matcher {
    /// Compile `pattern` under `options`. Empty patterns and invalid regexes
    /// yield `None`, which callers treat as "no match".
    pub fn new(pattern: &str, options: &SearchOptions) -> Option<Self> {
        if pattern.is_empty() {
            return None;
        }
        if !options.regex && options.case_sensitive {
            return Some(Matcher::Literal(pattern.to_string()));
        }

        let source = if options.regex {
            pattern.to_string()
        } else {
            regex::escape(pattern)
        };
        let compiled = RegexBuilder::new(&source)
            .case_insensitive(!options.case_sensitive)
            .build();

        match compiled {
            Ok(re) if options.regex => Some(Matcher::Pattern(re)),
            Ok(re) => Some(Matcher::Folded(re)),
            Err(err) => {
                tracing::warn!(pattern, %err, "invalid search regex");
                None
            }
        }
    }

    /// First raw match starting at or after byte `pos`
    fn find_at(&self, line: &str, pos: usize) -> Option<(usize, usize)> {
        match self {
            Matcher::Literal(needle) => line[pos..]
                .find(needle.as_str())
                .map(|offset| (pos + offset, pos + offset + needle.len())),
            Matcher::Folded(re) | Matcher::Pattern(re) => {
                re.find_at(line, pos).map(|m| (m.start(), m.end()))
            }
        }
    }

    /// First match starting at or after `from`, honoring whole-word
    /// filtering. Returns `(start, end)` byte offsets.
    pub fn find_from(&self, line: &str, from: usize, whole_word: bool) -> Option<(usize, usize)> {
        if from > line.len() {
            return None;
        }
        let mut pos = ceil_char_boundary(line, from);
        loop {
            let (start, end) = self.find_at(line, pos)?;
            if !whole_word || (is_word_boundary(line, start) && is_word_boundary(line, end)) {
                return Some((start, end));
            }
            if start >= line.len() {
                return None;
            }
            pos = next_char_boundary(line, start);
        }
    }

    /// Every non-overlapping match on the line, left to right
    pub fn matches_in(&self, line: &str, whole_word: bool) -> Vec<(usize, usize)> {
        let mut found = Vec::new();
        let mut pos = 0;
        while let Some((start, end)) = self.find_from(line, pos, whole_word) {
            found.push((start, end));
            let next = start + (end - start).max(1);
            if next > line.len() {
                break;
            }
            pos = ceil_char_boundary(line, next);
        }
        found
    }

    /// Last match with `from <= start < bound`. Candidates may overlap, so
    /// the scan restarts one character after each match start.
    pub fn last_between(
        &self,
        line: &str,
        from: usize,
        bound: usize,
        whole_word: bool,
    ) -> Option<(usize, usize)> {
        let mut last = None;
        let mut pos = from;
        while let Some((start, end)) = self.find_from(line, pos, whole_word) {
            if start >= bound {
                break;
            }
            last = Some((start, end));
            if start >= line.len() {
                break;
            }
            pos = next_char_boundary(line, start);
        }
        last
    }

    /// Text to put in place of the match at `start..end`. Regex patterns
    /// expand `$n` / `${name}` references against that exact span.
    pub fn replacement_for(&self, line: &str, start: usize, end: usize, replacement: &str) -> String {
        let Matcher::Pattern(re) = self else {
            return replacement.to_string();
        };

        let aligned = re.captures_at(line, start).filter(|caps| {
            caps.get(0)
                .map(|whole| whole.start() == start && whole.end() == end)
                .unwrap_or(false)
        });
        match aligned {
            Some(caps) => {
                let mut expanded = String::new();
                caps.expand(replacement, &mut expanded);
                expanded
            }
            None => {
                tracing::warn!(start, end, "regex match did not align with the replaced span");
                replacement.to_string()
            }
        }
    }
}
