//! Selection types: character-wise, line-wise and block selections.

use super::buffer::Buffer;
use super::cursor::Position;
use crate::util::floor_char_boundary;

/// How a selection's span is interpreted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionKind {
    /// Exact span between anchor and head
    #[default]
    Char,
    /// Whole lines from the first to the last touched line
    Line,
    /// Rectangular column range on every touched line
    Block,
}

/// A text selection with anchor (start point) and head (cursor position).
/// The anchor stays fixed while the head moves during selection extension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    /// Where the selection started (fixed point)
    pub anchor: Position,
    /// Where the cursor is (moving point)
    pub head: Position,
    pub kind: SelectionKind,
}

impl Selection {
    pub fn new(anchor: Position, head: Position) -> Self {
        Self {
            anchor,
            head,
            kind: SelectionKind::Char,
        }
    }

    pub fn with_kind(mut self, kind: SelectionKind) -> Self {
        self.kind = kind;
        self
    }

    /// Create a collapsed selection (cursor with no selection)
    pub fn collapsed(pos: Position) -> Self {
        Self::new(pos, pos)
    }

    /// Check if selection is empty (anchor == head)
    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    /// Get the start position (minimum of anchor and head)
    pub fn start(&self) -> Position {
        self.anchor.min(self.head)
    }

    /// Get the end position (maximum of anchor and head)
    pub fn end(&self) -> Position {
        self.anchor.max(self.head)
    }

    /// Check if selection is reversed (head before anchor)
    pub fn is_reversed(&self) -> bool {
        self.head < self.anchor
    }

    /// Extend selection to new head position
    pub fn extend_to(&mut self, pos: Position) {
        self.head = pos;
    }

    /// Collapse selection to head position
    pub fn collapse(&mut self) {
        self.anchor = self.head;
    }

    /// Check if a position is within this selection (end exclusive)
    pub fn contains(&self, pos: Position) -> bool {
        pos >= self.start() && pos < self.end()
    }

    /// Normalized `(start, end)` range for this selection's kind.
    ///
    /// Line-wise ranges start at column 0 and report column 0 on the end
    /// line, which is meant inclusively. Block ranges order the columns
    /// independently of the line order.
    pub fn range(&self) -> (Position, Position) {
        match self.kind {
            SelectionKind::Char => (self.start(), self.end()),
            SelectionKind::Line => (
                Position::new(self.start().line, 0),
                Position::new(self.end().line, 0),
            ),
            SelectionKind::Block => (
                Position::new(
                    self.start().line,
                    self.anchor.column.min(self.head.column),
                ),
                Position::new(self.end().line, self.anchor.column.max(self.head.column)),
            ),
        }
    }

    /// Extract the selected text from `buf`
    pub fn text(&self, buf: &Buffer) -> String {
        let (start, end) = self.range();
        let last_line = buf.line_count() - 1;
        let first = start.line.min(last_line);
        let last = end.line.min(last_line);

        match self.kind {
            SelectionKind::Char => buf.text_in_range(first, start.column, last, end.column),
            SelectionKind::Line => (first..=last)
                .map(|line| buf.get_line(line) + "\n")
                .collect(),
            SelectionKind::Block => (first..=last)
                .map(|line| {
                    let text = buf.get_line(line);
                    let from = floor_char_boundary(&text, start.column);
                    let to = floor_char_boundary(&text, end.column);
                    if from < to {
                        text[from..to].to_string()
                    } else {
                        String::new()
                    }
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_collapsed() {
        let sel = Selection::collapsed(Position::new(1, 5));
        assert!(sel.is_empty());
        assert_eq!(sel.anchor, sel.head);
    }

    #[test]
    fn test_selection_start_end() {
        let backward = Selection::new(Position::new(0, 5), Position::new(0, 0));
        assert_eq!(backward.start(), Position::new(0, 0));
        assert_eq!(backward.end(), Position::new(0, 5));
        assert!(backward.is_reversed());
    }

    #[test]
    fn test_selection_contains() {
        let sel = Selection::new(Position::new(0, 2), Position::new(0, 8));
        assert!(!sel.contains(Position::new(0, 1)));
        assert!(sel.contains(Position::new(0, 2)));
        assert!(!sel.contains(Position::new(0, 8))); // End is exclusive
    }

    #[test]
    fn test_char_selection_text() {
        let buf = Buffer::from_text("hello\nworld");
        let sel = Selection::new(Position::new(1, 3), Position::new(0, 3));
        assert_eq!(sel.text(&buf), "lo\nwor");
    }

    #[test]
    fn test_line_selection_text() {
        let buf = Buffer::from_text("a\nb\nc");
        let sel = Selection::new(Position::new(1, 1), Position::new(0, 0))
            .with_kind(SelectionKind::Line);
        assert_eq!(sel.text(&buf), "a\nb\n");
    }

    #[test]
    fn test_block_selection_text() {
        let buf = Buffer::from_text("abcdef\nxy\n123456");
        let sel = Selection::new(Position::new(0, 4), Position::new(2, 1))
            .with_kind(SelectionKind::Block);
        assert_eq!(sel.range(), (Position::new(0, 1), Position::new(2, 4)));
        assert_eq!(sel.text(&buf), "bcd\ny\n234");
    }
}
