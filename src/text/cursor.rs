//! Cursor and position types.

use super::buffer::Buffer;
use crate::util::{floor_char_boundary, next_char_boundary, prev_char_boundary};

/// A position in the buffer (line and byte column, both 0-indexed).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub const fn zero() -> Self {
        Self { line: 0, column: 0 }
    }
}

/// A single cursor with buffer-aware clamped movement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub line: usize,
    pub column: usize,
    /// Desired column for vertical movement.
    /// When moving up/down through lines of varying length, this preserves
    /// the "intended" column position even when a shorter line is traversed.
    pub desired_column: Option<usize>,
}

impl Cursor {
    pub const fn new(line: usize, column: usize) -> Self {
        Self {
            line,
            column,
            desired_column: None,
        }
    }

    pub const fn to_position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Jump to an absolute position (not clamped; see `clamp_to_buffer`)
    pub fn set_position(&mut self, line: usize, column: usize) {
        self.line = line;
        self.column = column;
        self.desired_column = None;
    }

    /// Get the effective column for vertical positioning
    pub fn effective_column(&self) -> usize {
        self.desired_column.unwrap_or(self.column)
    }

    /// Place the cursor on `self.line` at the desired column, clamped to the
    /// line and snapped to a char boundary
    fn settle_vertical(&mut self, buf: &Buffer) {
        let want = self.effective_column();
        self.desired_column = Some(want);
        self.column = buf
            .line(self.line)
            .map(|text| floor_char_boundary(text, want))
            .unwrap_or(0);
    }

    pub fn move_up(&mut self, buf: &Buffer) {
        self.line = self.line.saturating_sub(1);
        self.settle_vertical(buf);
    }

    pub fn move_down(&mut self, buf: &Buffer) {
        if self.line + 1 < buf.line_count() {
            self.line += 1;
        }
        self.settle_vertical(buf);
    }

    /// Move one character left, wrapping to the end of the previous line
    pub fn move_left(&mut self, buf: &Buffer) {
        self.desired_column = None;
        if self.column > 0 {
            self.column = prev_char_boundary(&buf.get_line(self.line), self.column);
        } else if self.line > 0 {
            self.line -= 1;
            self.column = buf.column_count(self.line);
        }
    }

    /// Move one character right, wrapping to the start of the next line
    pub fn move_right(&mut self, buf: &Buffer) {
        self.desired_column = None;
        let len = buf.column_count(self.line);
        if self.column < len {
            self.column = next_char_boundary(&buf.get_line(self.line), self.column);
        } else if self.line + 1 < buf.line_count() {
            self.line += 1;
            self.column = 0;
        }
    }

    pub fn move_to_line_start(&mut self) {
        self.desired_column = None;
        self.column = 0;
    }

    pub fn move_to_line_end(&mut self, buf: &Buffer) {
        self.desired_column = None;
        self.column = buf.column_count(self.line);
    }

    /// Pull the cursor back inside the buffer
    pub fn clamp_to_buffer(&mut self, buf: &Buffer) {
        self.line = self.line.min(buf.line_count() - 1);
        self.column = buf
            .line(self.line)
            .map(|text| floor_char_boundary(text, self.column))
            .unwrap_or(0);
    }
}

impl From<Position> for Cursor {
    fn from(pos: Position) -> Self {
        Self::new(pos.line, pos.column)
    }
}

impl From<Cursor> for Position {
    fn from(cursor: Cursor) -> Self {
        cursor.to_position()
    }
}
