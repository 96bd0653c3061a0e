//! Recorded edit actions and their inverses.

use crate::text::Buffer;
use crate::util::end_position;

/// A single recorded edit. Each variant carries exactly what is needed to
/// replay it and to reverse it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// One character inserted at `(line, col)`
    Insert { line: usize, col: usize, ch: char },
    /// One character removed from `(line, col)`
    Delete { line: usize, col: usize, ch: char },
    /// A whole line inserted so that it became line `line`
    InsertLine { line: usize, content: String },
    /// Line `line` removed; `content` is what it held. `only_line` is set
    /// when it was the buffer's last remaining line, which leaves an empty
    /// line behind instead of shrinking the buffer.
    DeleteLine {
        line: usize,
        content: String,
        only_line: bool,
    },
    /// Text (possibly multi-line) inserted at `(line, col)`
    InsertText { line: usize, col: usize, text: String },
    /// The span `(line, col)..(line_end, col_end)` removed; `content` is
    /// the removed text
    DeleteRange {
        line: usize,
        col: usize,
        line_end: usize,
        col_end: usize,
        content: String,
    },
}

impl Action {
    /// Describe deleting line `line` of `buf` as it stands now. Returns
    /// `None` when the line does not exist.
    pub fn delete_line(buf: &Buffer, line: usize) -> Option<Self> {
        let content = buf.line(line)?.to_string();
        Some(Action::DeleteLine {
            line,
            content,
            only_line: buf.line_count() == 1,
        })
    }

    /// Get the inverse action for undo
    pub fn inverse(&self) -> Self {
        match self {
            Action::Insert { line, col, ch } => Action::Delete {
                line: *line,
                col: *col,
                ch: *ch,
            },
            Action::Delete { line, col, ch } => Action::Insert {
                line: *line,
                col: *col,
                ch: *ch,
            },
            Action::InsertLine { line, content } => Action::DeleteLine {
                line: *line,
                content: content.clone(),
                only_line: false,
            },
            // The buffer is left holding one empty line; fill it back in
            Action::DeleteLine {
                line,
                content,
                only_line: true,
            } => Action::InsertText {
                line: *line,
                col: 0,
                text: content.clone(),
            },
            Action::DeleteLine {
                line,
                content,
                only_line: false,
            } => Action::InsertLine {
                line: *line,
                content: content.clone(),
            },
            Action::InsertText { line, col, text } => {
                let (line_end, col_end) = end_position(*line, *col, text);
                Action::DeleteRange {
                    line: *line,
                    col: *col,
                    line_end,
                    col_end,
                    content: text.clone(),
                }
            }
            Action::DeleteRange {
                line, col, content, ..
            } => Action::InsertText {
                line: *line,
                col: *col,
                text: content.clone(),
            },
        }
    }

    /// Replay this action against `buf`
    pub fn apply(&self, buf: &mut Buffer) {
        match self {
            Action::Insert { line, col, ch } => buf.insert_char(*line, *col, *ch),
            Action::Delete { line, col, .. } => {
                buf.delete_char(*line, *col);
            }
            Action::InsertLine { line, content } => buf.insert_line_at(*line, content.as_str()),
            Action::DeleteLine { line, .. } => buf.delete_line(*line),
            Action::InsertText { line, col, text } => buf.insert_text(*line, *col, text),
            Action::DeleteRange {
                line,
                col,
                line_end,
                col_end,
                ..
            } => {
                buf.delete_range(*line, *col, *line_end, *col_end);
            }
        }
    }

    /// Reverse this action against `buf`
    pub fn revert(&self, buf: &mut Buffer) {
        self.inverse().apply(buf);
    }
}
