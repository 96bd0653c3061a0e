//! Text buffer backed by the line-oriented piece table.
//!
//! Translates character, text and range edits into piece-table line
//! operations. Positions are `(line, column)` pairs with the column given as
//! a byte offset into the line; invalid positions make mutators a no-op.

use super::piece_table::PieceTable;

/// A span of text between two positions (end exclusive)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextSpan {
    pub line_start: usize,
    pub col_start: usize,
    pub line_end: usize,
    pub col_end: usize,
}

impl TextSpan {
    pub const fn new(line_start: usize, col_start: usize, line_end: usize, col_end: usize) -> Self {
        Self {
            line_start,
            col_start,
            line_end,
            col_end,
        }
    }
}

/// Document text with edit operations
#[derive(Debug, Clone, Default)]
pub struct Buffer {
    table: PieceTable,
}

impl Buffer {
    /// Create a buffer holding a single empty line
    pub fn new() -> Self {
        Self {
            table: PieceTable::new(),
        }
    }

    /// Create a buffer from text, splitting on `'\n'`
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(text.split('\n'))
    }

    /// Create a buffer whose original lines are `lines`
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table: PieceTable::from_lines(lines),
        }
    }

    /// Read-only access to the underlying piece table
    pub fn piece_table(&self) -> &PieceTable {
        &self.table
    }

    pub fn line_count(&self) -> usize {
        self.table.line_count()
    }

    /// Byte length of a line (0 for out-of-range lines)
    pub fn column_count(&self, line: usize) -> usize {
        self.table.column_count(line)
    }

    /// Borrow a line's content
    pub fn line(&self, line: usize) -> Option<&str> {
        self.table.line(line)
    }

    /// Copy of a line's content (empty for out-of-range lines)
    pub fn get_line(&self, line: usize) -> String {
        self.table.get_line(line)
    }

    /// Mutable access to a line (copy-on-write for original lines)
    pub fn line_mut(&mut self, line: usize) -> Option<&mut String> {
        self.table.line_mut(line)
    }

    pub fn is_valid_pos(&self, line: usize, col: usize) -> bool {
        self.table.is_valid_pos(line, col)
    }

    /// All lines joined with `'\n'`
    pub fn text(&self) -> String {
        self.table.all_lines().join("\n")
    }

    pub fn all_lines(&self) -> Vec<String> {
        self.table.all_lines()
    }

    // =========================================================================
    // Character edits
    // =========================================================================

    /// Insert a character at `(line, col)`
    pub fn insert_char(&mut self, line: usize, col: usize, ch: char) {
        if !self.is_valid_pos(line, col) {
            return;
        }
        if let Some(text) = self.table.line_mut(line) {
            text.insert(col, ch);
        }
    }

    /// Delete the character starting at `(line, col)`, returning it.
    ///
    /// Columns at or past the end of the line, or inside a multi-byte
    /// character, delete nothing.
    pub fn delete_char(&mut self, line: usize, col: usize) -> Option<char> {
        let current = self.table.line(line)?;
        if col >= current.len() || !current.is_char_boundary(col) {
            return None;
        }
        self.table.line_mut(line).map(|text| text.remove(col))
    }

    // =========================================================================
    // Text and range edits
    // =========================================================================

    /// Insert text at `(line, col)`. Embedded `'\n'` characters create new
    /// lines: the head of the line before `col` takes the first segment, the
    /// last segment takes the tail after `col`.
    pub fn insert_text(&mut self, line: usize, col: usize, text: &str) {
        if !self.is_valid_pos(line, col) || text.is_empty() {
            return;
        }

        let Some(first_nl) = text.find('\n') else {
            if let Some(current) = self.table.line_mut(line) {
                current.insert_str(col, text);
            }
            return;
        };

        let original = self.table.get_line(line);
        let (head, tail) = original.split_at(col);

        self.table
            .set_line(line, format!("{}{}", head, &text[..first_nl]));

        let mut segments = text[first_nl + 1..].split('\n').peekable();
        let mut index = line + 1;
        while let Some(segment) = segments.next() {
            if segments.peek().is_some() {
                self.table.insert_line_at(index, segment);
            } else {
                self.table.insert_line_at(index, format!("{}{}", segment, tail));
            }
            index += 1;
        }
    }

    /// Read the text between two positions without modifying the buffer
    pub fn text_in_range(
        &self,
        line_start: usize,
        col_start: usize,
        line_end: usize,
        col_end: usize,
    ) -> String {
        let Some(span) = self.normalize_span(line_start, col_start, line_end, col_end) else {
            return String::new();
        };
        if span.line_start == span.line_end {
            return self.get_line(span.line_start)[span.col_start..span.col_end].to_string();
        }
        let mut result = self.get_line(span.line_start)[span.col_start..].to_string();
        for line in span.line_start + 1..span.line_end {
            result.push('\n');
            result.push_str(&self.get_line(line));
        }
        result.push('\n');
        result.push_str(&self.get_line(span.line_end)[..span.col_end]);
        result
    }

    /// Clamp a span's columns to the lines they address and to char
    /// boundaries. Spans with reversed or out-of-range lines are rejected.
    fn normalize_span(
        &self,
        line_start: usize,
        col_start: usize,
        line_end: usize,
        col_end: usize,
    ) -> Option<TextSpan> {
        if line_start > line_end || line_end >= self.line_count() {
            return None;
        }
        let start_text = self.table.line(line_start)?;
        let end_text = self.table.line(line_end)?;
        let col_start = crate::util::floor_char_boundary(start_text, col_start);
        let col_end = crate::util::floor_char_boundary(end_text, col_end);
        if line_start == line_end && col_start > col_end {
            return None;
        }
        Some(TextSpan::new(line_start, col_start, line_end, col_end))
    }

    /// Delete the text between two positions, returning what was removed.
    ///
    /// For multi-line spans the head of the start line and the tail of the
    /// end line are joined, then the intervening lines are deleted from the
    /// bottom up so pending indices stay valid.
    pub fn delete_range(
        &mut self,
        line_start: usize,
        col_start: usize,
        line_end: usize,
        col_end: usize,
    ) -> String {
        let Some(span) = self.normalize_span(line_start, col_start, line_end, col_end) else {
            return String::new();
        };
        let removed = self.text_in_range(span.line_start, span.col_start, span.line_end, span.col_end);

        if span.line_start == span.line_end {
            if let Some(text) = self.table.line_mut(span.line_start) {
                text.replace_range(span.col_start..span.col_end, "");
            }
            return removed;
        }

        let head = self.get_line(span.line_start)[..span.col_start].to_string();
        let tail = self.get_line(span.line_end)[span.col_end..].to_string();
        self.table.set_line(span.line_start, head + &tail);

        for line in (span.line_start + 1..=span.line_end).rev() {
            self.table.delete_line(line);
        }
        removed
    }

    /// Split a line at `col` (Enter). The column is clamped to the line.
    pub fn split_line(&mut self, line: usize, col: usize) {
        let Some(content) = self.table.line(line) else {
            return;
        };
        let col = crate::util::floor_char_boundary(content, col);
        let right = content[col..].to_string();
        if let Some(text) = self.table.line_mut(line) {
            text.truncate(col);
        }
        self.table.insert_line_at(line + 1, right);
    }

    /// Append line `second` to line `first` and delete `second`
    /// (Backspace at the start of a line)
    pub fn join_lines(&mut self, first: usize, second: usize) {
        if second <= first || second >= self.line_count() {
            return;
        }
        let appended = self.get_line(second);
        if let Some(text) = self.table.line_mut(first) {
            text.push_str(&appended);
        }
        self.table.delete_line(second);
    }

    // =========================================================================
    // Line operations
    // =========================================================================

    /// Append a line at the end of the buffer
    pub fn insert_line(&mut self, text: impl Into<String>) {
        self.table.append_line(text);
    }

    pub fn insert_line_at(&mut self, index: usize, text: impl Into<String>) {
        self.table.insert_line_at(index, text);
    }

    pub fn delete_line(&mut self, index: usize) {
        self.table.delete_line(index);
    }

    pub fn set_line(&mut self, index: usize, text: impl Into<String>) {
        self.table.set_line(index, text);
    }

    /// Reset to a single empty line
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Replace all content with `lines`
    pub fn load_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.table.load_lines(lines);
    }

    /// Strip a trailing `'\r'` from every line (CRLF -> LF)
    pub fn normalize_newlines(&mut self) {
        for line in 0..self.line_count() {
            let has_cr = self
                .table
                .line(line)
                .map(|text| text.ends_with('\r'))
                .unwrap_or(false);
            if has_cr {
                if let Some(text) = self.table.line_mut(line) {
                    text.pop();
                }
            }
        }
    }

    /// Merge contiguous pieces in the underlying table
    pub fn compact(&mut self) {
        self.table.compact();
    }
}
