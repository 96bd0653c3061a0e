//! Utility functions for byte-column text handling
//!
//! Columns throughout the crate are byte offsets into UTF-8 lines. These
//! helpers keep those offsets on `char` boundaries so slicing never panics.

/// Check if a character counts as part of a word for whole-word matching
/// (alphanumeric or underscore)
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Check if byte offset `pos` in `line` sits on a word boundary.
///
/// The start and end of the line are always boundaries. Otherwise the
/// position is a boundary when the characters on either side differ in
/// word-ness.
pub fn is_word_boundary(line: &str, pos: usize) -> bool {
    if pos == 0 || pos >= line.len() {
        return true;
    }
    if !line.is_char_boundary(pos) {
        return false;
    }
    let before = line[..pos].chars().next_back();
    let after = line[pos..].chars().next();
    match (before, after) {
        (Some(b), Some(a)) => is_word_char(b) != is_word_char(a),
        _ => true,
    }
}

/// Largest char boundary `<= col`, clamped to the line length
pub fn floor_char_boundary(line: &str, col: usize) -> usize {
    if col >= line.len() {
        return line.len();
    }
    let mut col = col;
    while !line.is_char_boundary(col) {
        col -= 1;
    }
    col
}

/// Smallest char boundary `>= col`, clamped to the line length
pub fn ceil_char_boundary(line: &str, col: usize) -> usize {
    if col >= line.len() {
        return line.len();
    }
    let mut col = col;
    while !line.is_char_boundary(col) {
        col += 1;
    }
    col
}

/// Byte offset of the character before `col` (0 stays 0)
pub fn prev_char_boundary(line: &str, col: usize) -> usize {
    let col = floor_char_boundary(line, col);
    line[..col]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset just past the character at `col` (end of line stays put)
pub fn next_char_boundary(line: &str, col: usize) -> usize {
    let col = floor_char_boundary(line, col);
    line[col..]
        .chars()
        .next()
        .map(|ch| col + ch.len_utf8())
        .unwrap_or(line.len())
}

/// Split text into lines on `'\n'`.
///
/// Text ending with a newline yields a trailing empty line, and empty text
/// yields no lines at all.
pub fn split_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n').map(str::to_string).collect()
}

/// Line terminator used when writing lines back out as text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// The ending of the first line break in `text` (LF when there is none)
    pub fn detect(text: &str) -> Self {
        match text.find('\n') {
            Some(pos) if text[..pos].ends_with('\r') => LineEnding::CrLf,
            _ => LineEnding::Lf,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    /// Join `lines` with this ending
    pub fn join<S: AsRef<str>>(self, lines: &[S]) -> String {
        let mut out = String::new();
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                out.push_str(self.as_str());
            }
            out.push_str(line.as_ref());
        }
        out
    }
}

/// Where the cursor ends up after inserting `text` at `(line, col)`
pub fn end_position(line: usize, col: usize, text: &str) -> (usize, usize) {
    match text.rfind('\n') {
        Some(last_nl) => {
            let newlines = text.bytes().filter(|&b| b == b'\n').count();
            (line + newlines, text.len() - last_nl - 1)
        }
        None => (line, col + text.len()),
    }
}
