//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use strata::history::{Action, UndoManager};
use strata::multi_cursor::MultiCursor;
use strata::text::Buffer;

/// Create a buffer from a list of lines
pub fn buffer(lines: &[&str]) -> Buffer {
    Buffer::from_lines(lines.iter().copied())
}

/// Create a multi-cursor set whose primary is the first position and whose
/// secondaries follow in the given order
pub fn cursors_at(positions: &[(usize, usize)]) -> MultiCursor {
    let mut mc = MultiCursor::new();
    if let Some(&(line, col)) = positions.first() {
        mc.set_primary(line, col);
    }
    for &(line, col) in positions.iter().skip(1) {
        mc.add_cursor(line, col);
    }
    mc
}

/// Positions of every cursor, in stored order
pub fn cursor_positions(mc: &MultiCursor) -> Vec<(usize, usize)> {
    mc.cursors().iter().map(|c| (c.line, c.column)).collect()
}

/// Type `text` at `(line, col)` one character at a time, recording each
/// insertion. Newlines split the line and are recorded as inserted text.
pub fn type_text(
    buf: &mut Buffer,
    undo: &mut UndoManager,
    line: usize,
    col: usize,
    text: &str,
) -> (usize, usize) {
    let (mut line, mut col) = (line, col);
    for ch in text.chars() {
        if ch == '\n' {
            buf.insert_text(line, col, "\n");
            undo.add_action(Action::InsertText {
                line,
                col,
                text: "\n".to_string(),
            });
            line += 1;
            col = 0;
        } else {
            buf.insert_char(line, col, ch);
            undo.add_action(Action::Insert { line, col, ch });
            col += ch.len_utf8();
        }
    }
    (line, col)
}

/// Apply `action` to `buf` and record it, as a command handler would
pub fn perform(buf: &mut Buffer, undo: &mut UndoManager, action: Action) {
    action.apply(buf);
    undo.add_action(action);
}
