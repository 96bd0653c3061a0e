//! Multiple coordinated cursors with batch editing.
//!
//! Index 0 is the primary cursor. It always exists and cannot be removed.
//! Batch edits visit cursors bottom-to-top, right-to-left, so an edit never
//! moves the buffer coordinates of a cursor that has not been visited yet.
//! Cursors that were already visited are shifted to follow the text they
//! sit in.

use crate::text::{Buffer, Cursor, Position, Selection};
use crate::tracing::CursorSnapshot;
use crate::util::{end_position, floor_char_boundary, next_char_boundary, prev_char_boundary};

/// One cursor of a multi-cursor set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorEntry {
    pub line: usize,
    pub column: usize,
    pub has_selection: bool,
    pub anchor: Position,
    /// Sticky column for vertical moves, kept between batch moves
    pub desired_column: Option<usize>,
}

impl CursorEntry {
    pub const fn new(line: usize, column: usize) -> Self {
        Self {
            line,
            column,
            has_selection: false,
            anchor: Position::zero(),
            desired_column: None,
        }
    }

    pub const fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// The selection from the anchor to this cursor, if one is active
    pub fn selection(&self) -> Option<Selection> {
        self.has_selection
            .then(|| Selection::new(self.anchor, self.position()))
    }

    fn set_position(&mut self, pos: Position) {
        self.line = pos.line;
        self.column = pos.column;
        self.desired_column = None;
    }

    /// Run a single-cursor movement on this entry
    fn apply_motion(&mut self, motion: impl FnOnce(&mut Cursor)) {
        let mut cursor = Cursor {
            line: self.line,
            column: self.column,
            desired_column: self.desired_column,
        };
        motion(&mut cursor);
        self.line = cursor.line;
        self.column = cursor.column;
        self.desired_column = cursor.desired_column;
    }

    fn clamp(&mut self, buf: &Buffer) {
        self.apply_motion(|cursor| cursor.clamp_to_buffer(buf));
    }
}

/// Set of cursors editing one buffer together
#[derive(Debug, Clone)]
pub struct MultiCursor {
    cursors: Vec<CursorEntry>,
}

impl Default for MultiCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiCursor {
    /// A single primary cursor at (0, 0)
    pub fn new() -> Self {
        Self {
            cursors: vec![CursorEntry::new(0, 0)],
        }
    }

    pub fn cursors(&self) -> &[CursorEntry] {
        &self.cursors
    }

    pub fn count(&self) -> usize {
        self.cursors.len()
    }

    /// True when there is more than the primary cursor
    pub fn is_active(&self) -> bool {
        self.cursors.len() > 1
    }

    pub fn primary(&self) -> &CursorEntry {
        &self.cursors[0]
    }

    /// Add a cursor and return its index
    pub fn add_cursor(&mut self, line: usize, column: usize) -> usize {
        self.cursors.push(CursorEntry::new(line, column));
        self.cursors.len() - 1
    }

    /// Remove a secondary cursor. The primary (index 0) and out-of-range
    /// indices are rejected.
    pub fn remove_cursor(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.cursors.len() {
            return false;
        }
        self.cursors.remove(index);
        true
    }

    /// Drop every cursor except the primary
    pub fn clear_secondary(&mut self) {
        self.cursors.truncate(1);
    }

    pub fn set_primary(&mut self, line: usize, column: usize) {
        self.cursors[0].set_position(Position::new(line, column));
    }

    // =========================================================================
    // Batch movement
    // =========================================================================

    pub fn move_all_up(&mut self, buf: &Buffer) {
        for entry in &mut self.cursors {
            if entry.line > 0 {
                entry.apply_motion(|cursor| cursor.move_up(buf));
            }
        }
    }

    pub fn move_all_down(&mut self, buf: &Buffer) {
        for entry in &mut self.cursors {
            if entry.line + 1 < buf.line_count() {
                entry.apply_motion(|cursor| cursor.move_down(buf));
            }
        }
    }

    pub fn move_all_left(&mut self, buf: &Buffer) {
        for entry in &mut self.cursors {
            entry.apply_motion(|cursor| cursor.move_left(buf));
        }
    }

    pub fn move_all_right(&mut self, buf: &Buffer) {
        for entry in &mut self.cursors {
            entry.apply_motion(|cursor| cursor.move_right(buf));
        }
    }

    pub fn move_all_to_line_start(&mut self) {
        for entry in &mut self.cursors {
            entry.apply_motion(Cursor::move_to_line_start);
        }
    }

    pub fn move_all_to_line_end(&mut self, buf: &Buffer) {
        for entry in &mut self.cursors {
            entry.apply_motion(|cursor| cursor.move_to_line_end(buf));
        }
    }

    // =========================================================================
    // Batch edits
    // =========================================================================

    /// Cursor indices sorted by position in reverse document order (last
    /// first). Ties keep their stored order.
    fn indices_in_reverse_order(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.cursors.len()).collect();
        indices.sort_by(|&a, &b| {
            let ca = &self.cursors[a];
            let cb = &self.cursors[b];
            cb.line
                .cmp(&ca.line)
                .then_with(|| cb.column.cmp(&ca.column))
        });
        indices
    }

    /// Clamp every cursor into the buffer, then drive `edit` over them in
    /// reverse document order. Coincident cursors edit once; the rest of
    /// the group follows the first one's result.
    fn edit_in_reverse_order<F>(&mut self, buf: &mut Buffer, mut edit: F)
    where
        F: FnMut(&mut Buffer, &mut [CursorEntry], usize, &[usize]),
    {
        let snapshot = tracing::enabled!(tracing::Level::TRACE)
            .then(|| CursorSnapshot::from_multi_cursor(self));

        for entry in &mut self.cursors {
            entry.clamp(buf);
        }
        let order = self.indices_in_reverse_order();
        let before: Vec<Position> = order.iter().map(|&i| self.cursors[i].position()).collect();

        // (follower, leader) pairs of cursors that started on the same spot
        let mut followers = Vec::new();
        let mut leader = order.first().copied().unwrap_or(0);
        for (step, &idx) in order.iter().enumerate() {
            if step > 0 && before[step] == before[step - 1] {
                followers.push((idx, leader));
                continue;
            }
            leader = idx;
            edit(buf, &mut self.cursors, idx, &order[..step]);
        }

        for (follower, leader) in followers {
            let pos = self.cursors[leader].position();
            self.cursors[follower].set_position(pos);
        }
        for entry in &mut self.cursors {
            entry.desired_column = None;
        }

        if let Some(changes) =
            snapshot.and_then(|before| before.diff(&CursorSnapshot::from_multi_cursor(self)))
        {
            tracing::trace!(%changes, "batch edit moved cursors");
        }
    }

    /// Insert `text` at every cursor. Each cursor ends up just after its
    /// inserted text.
    pub fn insert_at_all(&mut self, buf: &mut Buffer, text: &str) {
        if text.is_empty() {
            return;
        }
        let newlines = text.bytes().filter(|&b| b == b'\n').count();

        self.edit_in_reverse_order(buf, |buf, cursors, idx, done| {
            let at = cursors[idx].position();
            buf.insert_text(at.line, at.column, text);
            let (line, column) = end_position(at.line, at.column, text);

            for &j in done {
                let other = &mut cursors[j];
                if other.line == at.line && other.column >= at.column {
                    if newlines == 0 {
                        other.column += text.len();
                    } else {
                        other.line += newlines;
                        other.column = other.column - at.column + column;
                    }
                } else if other.line > at.line {
                    other.line += newlines;
                }
            }
            cursors[idx].set_position(Position::new(line, column));
        });
    }

    /// Delete the character before every cursor, joining with the previous
    /// line at column 0.
    pub fn backspace_at_all(&mut self, buf: &mut Buffer) {
        self.edit_in_reverse_order(buf, |buf, cursors, idx, done| {
            let at = cursors[idx].position();
            if at.column > 0 {
                let from = prev_char_boundary(&buf.get_line(at.line), at.column);
                let width = at.column - from;
                buf.delete_char(at.line, from);
                for &j in done {
                    let other = &mut cursors[j];
                    if other.line == at.line && other.column >= at.column {
                        other.column -= width;
                    }
                }
                cursors[idx].column = from;
            } else if at.line > 0 {
                let prev_len = buf.column_count(at.line - 1);
                buf.join_lines(at.line - 1, at.line);
                shift_after_join(cursors, done, at.line, prev_len);
                cursors[idx].set_position(Position::new(at.line - 1, prev_len));
            }
        });
    }

    /// Delete the character under every cursor, joining with the next line
    /// at end of line.
    pub fn delete_at_all(&mut self, buf: &mut Buffer) {
        self.edit_in_reverse_order(buf, |buf, cursors, idx, done| {
            let at = cursors[idx].position();
            let len = buf.column_count(at.line);
            if at.column < len {
                let width = next_char_boundary(&buf.get_line(at.line), at.column) - at.column;
                buf.delete_char(at.line, at.column);
                for &j in done {
                    let other = &mut cursors[j];
                    if other.line == at.line && other.column > at.column {
                        other.column -= width;
                    }
                }
            } else if at.line + 1 < buf.line_count() {
                buf.join_lines(at.line, at.line + 1);
                shift_after_join(cursors, done, at.line + 1, len);
            }
        });
    }

    // =========================================================================
    // Selections
    // =========================================================================

    /// Start a selection at every cursor's current position
    pub fn set_anchor_at_all(&mut self) {
        for entry in &mut self.cursors {
            entry.has_selection = true;
            entry.anchor = entry.position();
        }
    }

    pub fn clear_selection_at_all(&mut self) {
        for entry in &mut self.cursors {
            entry.has_selection = false;
        }
    }

    // =========================================================================
    // Adding cursors
    // =========================================================================

    fn occupied(&self, line: usize, column: usize) -> bool {
        self.cursors
            .iter()
            .any(|c| c.line == line && c.column == column)
    }

    /// Add a cursor at the next occurrence of `word` after the most recently
    /// added cursor, wrapping to the top of the buffer. Positions that
    /// already hold a cursor are skipped. Returns the new cursor's index.
    pub fn add_cursor_at_next_match(&mut self, buf: &Buffer, word: &str) -> Option<usize> {
        if word.is_empty() {
            return None;
        }
        let last = self.cursors[self.cursors.len() - 1];
        let start_line = last.line.min(buf.line_count() - 1);
        let start_col = {
            let text = buf.line(start_line).unwrap_or("");
            if last.column < text.len() {
                next_char_boundary(text, floor_char_boundary(text, last.column))
            } else {
                text.len()
            }
        };

        for line in start_line..buf.line_count() {
            let text = buf.line(line).unwrap_or("");
            let from = if line == start_line { start_col } else { 0 };
            let hit = text[from..]
                .match_indices(word)
                .map(|(pos, _)| from + pos)
                .find(|&col| !self.occupied(line, col));
            if let Some(col) = hit {
                return Some(self.add_cursor(line, col));
            }
        }

        for line in 0..=start_line {
            let text = buf.line(line).unwrap_or("");
            let limit = if line == start_line {
                start_col
            } else {
                text.len()
            };
            let hit = text
                .match_indices(word)
                .map(|(pos, _)| pos)
                .take_while(|&col| col < limit)
                .find(|&col| !self.occupied(line, col));
            if let Some(col) = hit {
                return Some(self.add_cursor(line, col));
            }
        }

        tracing::trace!(word, "no further match for a new cursor");
        None
    }

    /// Add a cursor at `column` on every line of `start_line..=end_line`
    /// that does not already have one there
    pub fn add_cursors_on_lines(&mut self, start_line: usize, end_line: usize, column: usize) {
        for line in start_line..=end_line {
            if !self.occupied(line, column) {
                self.add_cursor(line, column);
            }
        }
    }

    // =========================================================================
    // Ordering
    // =========================================================================

    /// Sort cursors top to bottom, left to right
    pub fn sort(&mut self) {
        self.cursors
            .sort_by(|a, b| a.line.cmp(&b.line).then_with(|| a.column.cmp(&b.column)));
    }

    /// Sort, then merge cursors that share a position. Never empties the
    /// set.
    pub fn dedup(&mut self) {
        self.sort();
        self.cursors
            .dedup_by(|a, b| a.line == b.line && a.column == b.column);
        if self.cursors.is_empty() {
            self.cursors.push(CursorEntry::new(0, 0));
        }
    }
}

/// Line `removed` was appended to the line above it, which was `prev_len`
/// bytes long. Move the already-edited cursors to match.
fn shift_after_join(cursors: &mut [CursorEntry], done: &[usize], removed: usize, prev_len: usize) {
    for &j in done {
        let other = &mut cursors[j];
        if other.line == removed {
            other.line -= 1;
            other.column += prev_len;
        } else if other.line > removed {
            other.line -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(mc: &MultiCursor) -> Vec<(usize, usize)> {
        mc.cursors().iter().map(|c| (c.line, c.column)).collect()
    }

    #[test]
    fn test_primary_cannot_be_removed() {
        let mut mc = MultiCursor::new();
        assert!(!mc.remove_cursor(0));
        let idx = mc.add_cursor(1, 0);
        assert_eq!(idx, 1);
        assert!(mc.remove_cursor(1));
        assert!(!mc.remove_cursor(1));
        assert_eq!(mc.count(), 1);
    }

    #[test]
    fn test_insert_keeps_primary_first() {
        let mut buf = Buffer::from_text("abcdef");
        let mut mc = MultiCursor::new();
        mc.set_primary(0, 2);
        mc.add_cursor(0, 5);
        mc.insert_at_all(&mut buf, "X");
        assert_eq!(buf.text(), "abXcdeXf");
        assert_eq!(positions(&mc), vec![(0, 3), (0, 7)]);
    }

    #[test]
    fn test_insert_multiline_shifts_later_cursors() {
        let mut buf = Buffer::from_text("ab cd\nef");
        let mut mc = MultiCursor::new();
        mc.set_primary(0, 1);
        mc.add_cursor(0, 4);
        mc.add_cursor(1, 1);
        mc.insert_at_all(&mut buf, "\n");
        assert_eq!(buf.all_lines(), vec!["a", "b c", "d", "e", "f"]);
        assert_eq!(positions(&mc), vec![(1, 0), (2, 0), (4, 0)]);
    }

    #[test]
    fn test_backspace_on_same_line() {
        let mut buf = Buffer::from_text("abcd");
        let mut mc = MultiCursor::new();
        mc.set_primary(0, 2);
        mc.add_cursor(0, 4);
        mc.backspace_at_all(&mut buf);
        assert_eq!(buf.text(), "ac");
        assert_eq!(positions(&mc), vec![(0, 1), (0, 2)]);
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut buf = Buffer::from_text("ab\ncd\nef");
        let mut mc = MultiCursor::new();
        mc.set_primary(1, 0);
        mc.add_cursor(2, 0);
        mc.backspace_at_all(&mut buf);
        assert_eq!(buf.all_lines(), vec!["abcdef"]);
        assert_eq!(positions(&mc), vec![(0, 2), (0, 4)]);
    }

    #[test]
    fn test_backspace_multibyte() {
        let mut buf = Buffer::from_text("é1é2");
        let mut mc = MultiCursor::new();
        mc.set_primary(0, 2);
        mc.add_cursor(0, 5);
        mc.backspace_at_all(&mut buf);
        assert_eq!(buf.text(), "12");
        assert_eq!(positions(&mc), vec![(0, 0), (0, 1)]);
    }

    #[test]
    fn test_delete_joins_and_shifts() {
        let mut buf = Buffer::from_text("ab\ncd\nef");
        let mut mc = MultiCursor::new();
        mc.set_primary(0, 2);
        mc.add_cursor(1, 2);
        mc.add_cursor(2, 0);
        mc.delete_at_all(&mut buf);
        assert_eq!(buf.all_lines(), vec!["abcdf"]);
        assert_eq!(positions(&mc), vec![(0, 2), (0, 4), (0, 4)]);
    }

    #[test]
    fn test_coincident_cursors_edit_once() {
        let mut buf = Buffer::from_text("ab");
        let mut mc = MultiCursor::new();
        mc.set_primary(0, 1);
        mc.add_cursor(0, 1);
        mc.insert_at_all(&mut buf, "X");
        assert_eq!(buf.text(), "aXb");
    }

    #[test]
    fn test_move_all_clamps() {
        let buf = Buffer::from_text("long line\nab");
        let mut mc = MultiCursor::new();
        mc.set_primary(0, 8);
        mc.add_cursor(1, 1);
        mc.move_all_down(&buf);
        assert_eq!(positions(&mc), vec![(1, 2), (1, 1)]);
        mc.move_all_up(&buf);
        assert_eq!(positions(&mc), vec![(0, 8), (0, 1)]);
    }

    #[test]
    fn test_vertical_moves_keep_sticky_column() {
        let buf = Buffer::from_text("long line\nab\nlong line");
        let mut mc = MultiCursor::new();
        mc.set_primary(0, 8);
        mc.move_all_down(&buf);
        mc.move_all_down(&buf);
        assert_eq!(positions(&mc), vec![(2, 8)]);

        mc.move_all_up(&buf);
        mc.move_all_left(&buf);
        mc.move_all_down(&buf);
        assert_eq!(positions(&mc), vec![(2, 1)]);
    }

    #[test]
    fn test_edit_clears_sticky_column() {
        let mut buf = Buffer::from_text("long line\nab\nlong line");
        let mut mc = MultiCursor::new();
        mc.set_primary(0, 8);
        mc.move_all_down(&buf);
        mc.insert_at_all(&mut buf, "c");
        mc.move_all_down(&buf);
        assert_eq!(positions(&mc), vec![(2, 3)]);
    }

    #[test]
    fn test_next_match_skips_occupied_and_wraps() {
        let buf = Buffer::from_text("foo x foo\nfoo");
        let mut mc = MultiCursor::new();
        assert_eq!(mc.add_cursor_at_next_match(&buf, "foo"), Some(1));
        assert_eq!(mc.add_cursor_at_next_match(&buf, "foo"), Some(2));
        assert_eq!(positions(&mc), vec![(0, 0), (0, 6), (1, 0)]);
        assert_eq!(mc.add_cursor_at_next_match(&buf, "foo"), None);
        assert_eq!(mc.add_cursor_at_next_match(&buf, ""), None);
    }

    #[test]
    fn test_dedup_and_sort() {
        let mut mc = MultiCursor::new();
        mc.set_primary(2, 0);
        mc.add_cursor(0, 1);
        mc.add_cursor(2, 0);
        mc.dedup();
        assert_eq!(positions(&mc), vec![(0, 1), (2, 0)]);
    }

    #[test]
    fn test_anchor_and_selection() {
        let mut mc = MultiCursor::new();
        mc.set_primary(0, 1);
        mc.set_anchor_at_all();
        mc.set_primary(0, 4);
        let sel = mc.primary().selection().unwrap();
        assert_eq!(sel.start(), Position::new(0, 1));
        assert_eq!(sel.end(), Position::new(0, 4));
        mc.clear_selection_at_all();
        assert!(mc.primary().selection().is_none());
    }
}
