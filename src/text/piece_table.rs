//! Line-oriented piece table.
//!
//! Lines loaded in bulk live in an immutable `original` store; every line
//! created or modified afterwards is appended to the `add` store. The
//! document is the concatenation of the pieces, each of which names a
//! contiguous run of lines in one of the two stores.

/// Which store a piece points into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Original,
    Add,
}

/// A contiguous run of `count` lines starting at `start` in `source`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub source: Source,
    pub start: usize,
    pub count: usize,
}

impl Piece {
    const fn new(source: Source, start: usize, count: usize) -> Self {
        Self {
            source,
            start,
            count,
        }
    }
}

/// Location of a logical line: the owning piece and the offset inside it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PiecePos {
    piece_idx: usize,
    offset: usize,
}

/// Line storage that never has zero lines.
#[derive(Debug, Clone)]
pub struct PieceTable {
    original: Vec<String>,
    add: Vec<String>,
    pieces: Vec<Piece>,
    line_count: usize,
}

impl Default for PieceTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceTable {
    /// Create a table holding a single empty line
    pub fn new() -> Self {
        Self {
            original: Vec::new(),
            add: vec![String::new()],
            pieces: vec![Piece::new(Source::Add, 0, 1)],
            line_count: 1,
        }
    }

    /// Create a table whose original store is `lines`
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new();
        table.load_lines(lines);
        table
    }

    /// Total number of logical lines (always >= 1)
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Number of pieces currently describing the document
    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    /// The piece descriptors, in document order
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Walk the piece list to the piece containing `line`. O(piece count).
    fn find_line(&self, line: usize) -> Option<PiecePos> {
        let mut cumulative = 0;
        for (piece_idx, piece) in self.pieces.iter().enumerate() {
            if cumulative + piece.count > line {
                return Some(PiecePos {
                    piece_idx,
                    offset: line - cumulative,
                });
            }
            cumulative += piece.count;
        }
        None
    }

    fn store(&self, source: Source) -> &[String] {
        match source {
            Source::Original => &self.original,
            Source::Add => &self.add,
        }
    }

    fn line_at(&self, pos: PiecePos) -> &str {
        let piece = self.pieces[pos.piece_idx];
        &self.store(piece.source)[piece.start + pos.offset]
    }

    /// Split a piece so that `offset` becomes the first line of a new piece.
    /// Offsets at either edge are a no-op.
    fn split_piece(&mut self, piece_idx: usize, offset: usize) {
        let piece = self.pieces[piece_idx];
        if offset == 0 || offset >= piece.count {
            return;
        }
        let second = Piece::new(piece.source, piece.start + offset, piece.count - offset);
        self.pieces[piece_idx].count = offset;
        self.pieces.insert(piece_idx + 1, second);
    }

    fn debug_check(&self) {
        debug_assert!(self.line_count >= 1, "piece table lost its last line");
        debug_assert_eq!(
            self.pieces.iter().map(|p| p.count).sum::<usize>(),
            self.line_count,
            "piece counts diverged from cached line count"
        );
    }

    /// Borrow the content of a line
    pub fn line(&self, line: usize) -> Option<&str> {
        self.find_line(line).map(|pos| self.line_at(pos))
    }

    /// Copy of a line's content (empty for out-of-range lines)
    pub fn get_line(&self, line: usize) -> String {
        self.line(line).map(str::to_string).unwrap_or_default()
    }

    /// Byte length of a line (0 for out-of-range lines)
    pub fn column_count(&self, line: usize) -> usize {
        self.line(line).map(str::len).unwrap_or(0)
    }

    /// Mutable access to a line.
    ///
    /// Original lines are copied into the add store first and isolated in a
    /// piece of their own, so the original store is never written and no
    /// other line is affected.
    pub fn line_mut(&mut self, line: usize) -> Option<&mut String> {
        let mut pos = self.find_line(line)?;
        let piece = self.pieces[pos.piece_idx];

        if piece.source == Source::Add {
            return Some(&mut self.add[piece.start + pos.offset]);
        }

        let add_idx = self.add.len();
        self.add
            .push(self.original[piece.start + pos.offset].clone());

        if pos.offset > 0 {
            self.split_piece(pos.piece_idx, pos.offset);
            pos.piece_idx += 1;
        }
        if self.pieces[pos.piece_idx].count > 1 {
            self.split_piece(pos.piece_idx, 1);
        }
        self.pieces[pos.piece_idx] = Piece::new(Source::Add, add_idx, 1);
        self.debug_check();

        Some(&mut self.add[add_idx])
    }

    /// Insert a new line so that it becomes line `index` (clamped to the end)
    pub fn insert_line_at(&mut self, index: usize, text: impl Into<String>) {
        let index = index.min(self.line_count);
        let add_idx = self.add.len();
        self.add.push(text.into());

        if index == self.line_count {
            match self.pieces.last_mut() {
                Some(last) if last.source == Source::Add && last.start + last.count == add_idx => {
                    last.count += 1;
                }
                _ => self.pieces.push(Piece::new(Source::Add, add_idx, 1)),
            }
        } else if let Some(mut pos) = self.find_line(index) {
            if pos.offset > 0 {
                self.split_piece(pos.piece_idx, pos.offset);
                pos.piece_idx += 1;
            }
            self.pieces
                .insert(pos.piece_idx, Piece::new(Source::Add, add_idx, 1));
        }

        self.line_count += 1;
        self.debug_check();
    }

    /// Append a line at the end
    pub fn append_line(&mut self, text: impl Into<String>) {
        self.insert_line_at(self.line_count, text);
    }

    /// Delete line `index`. Deleting the only line leaves a single empty line.
    pub fn delete_line(&mut self, index: usize) {
        let Some(pos) = self.find_line(index) else {
            return;
        };
        let piece = self.pieces[pos.piece_idx];

        if piece.count == 1 {
            self.pieces.remove(pos.piece_idx);
        } else if pos.offset == 0 {
            let p = &mut self.pieces[pos.piece_idx];
            p.start += 1;
            p.count -= 1;
        } else if pos.offset == piece.count - 1 {
            self.pieces[pos.piece_idx].count -= 1;
        } else {
            self.split_piece(pos.piece_idx, pos.offset);
            let second = &mut self.pieces[pos.piece_idx + 1];
            second.start += 1;
            second.count -= 1;
        }

        self.line_count -= 1;

        if self.line_count == 0 {
            self.add.push(String::new());
            self.pieces
                .push(Piece::new(Source::Add, self.add.len() - 1, 1));
            self.line_count = 1;
        }
        self.debug_check();
    }

    /// Replace the content of a line (no-op when out of range)
    pub fn set_line(&mut self, index: usize, content: impl Into<String>) {
        if let Some(line) = self.line_mut(index) {
            *line = content.into();
        }
    }

    /// Check if `(line, col)` addresses an existing line and a char boundary
    /// within it (the end of the line is valid)
    pub fn is_valid_pos(&self, line: usize, col: usize) -> bool {
        self.line(line)
            .map(|text| col <= text.len() && text.is_char_boundary(col))
            .unwrap_or(false)
    }

    /// Replace all content with `lines`, which become the original store
    pub fn load_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.original = lines.into_iter().map(Into::into).collect();
        if self.original.is_empty() {
            self.original.push(String::new());
        }
        self.add.clear();
        self.pieces = vec![Piece::new(Source::Original, 0, self.original.len())];
        self.line_count = self.original.len();
        self.debug_check();
    }

    /// Reset to a single empty line
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Materialize every line in document order
    pub fn all_lines(&self) -> Vec<String> {
        let mut result = Vec::with_capacity(self.line_count);
        for piece in &self.pieces {
            let store = self.store(piece.source);
            result.extend_from_slice(&store[piece.start..piece.start + piece.count]);
        }
        result
    }

    /// Merge adjacent pieces that point at contiguous lines of the same store
    pub fn compact(&mut self) {
        if self.pieces.len() <= 1 {
            return;
        }
        let before = self.pieces.len();
        let mut merged: Vec<Piece> = Vec::with_capacity(self.pieces.len());
        for piece in self.pieces.drain(..) {
            match merged.last_mut() {
                Some(prev)
                    if prev.source == piece.source && prev.start + prev.count == piece.start =>
                {
                    prev.count += piece.count;
                }
                _ => merged.push(piece),
            }
        }
        self.pieces = merged;
        tracing::trace!(before, after = self.pieces.len(), "compacted piece table");
        self.debug_check();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(lines: &[&str]) -> PieceTable {
        PieceTable::from_lines(lines.iter().copied())
    }

    #[test]
    fn test_new_has_one_empty_line() {
        let pt = PieceTable::new();
        assert_eq!(pt.line_count(), 1);
        assert_eq!(pt.get_line(0), "");
        assert_eq!(pt.piece_count(), 1);
    }

    #[test]
    fn test_load_lines_single_original_piece() {
        let pt = table(&["a", "b", "c"]);
        assert_eq!(pt.line_count(), 3);
        assert_eq!(
            pt.pieces(),
            &[Piece {
                source: Source::Original,
                start: 0,
                count: 3
            }]
        );
        assert_eq!(pt.all_lines(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_load_empty_keeps_one_line() {
        let pt = PieceTable::from_lines(Vec::<String>::new());
        assert_eq!(pt.line_count(), 1);
        assert_eq!(pt.get_line(0), "");
    }

    #[test]
    fn test_line_mut_copy_on_write_isolates_line() {
        let mut pt = table(&["a", "b", "c"]);
        pt.line_mut(1).unwrap().push('!');

        assert_eq!(pt.all_lines(), vec!["a", "b!", "c"]);
        assert_eq!(pt.piece_count(), 3);
        assert_eq!(pt.pieces()[0].source, Source::Original);
        assert_eq!(pt.pieces()[1].source, Source::Add);
        assert_eq!(pt.pieces()[2].source, Source::Original);
        // Original store untouched
        assert_eq!(pt.original[1], "b");
    }

    #[test]
    fn test_line_mut_on_add_line_does_not_split() {
        let mut pt = table(&["a"]);
        pt.append_line("x");
        let pieces = pt.piece_count();
        pt.line_mut(1).unwrap().push('y');
        assert_eq!(pt.piece_count(), pieces);
        assert_eq!(pt.get_line(1), "xy");
    }

    #[test]
    fn test_line_mut_out_of_range() {
        let mut pt = table(&["a"]);
        assert!(pt.line_mut(5).is_none());
    }

    #[test]
    fn test_insert_line_in_middle_splits_piece() {
        let mut pt = table(&["a", "b", "c"]);
        pt.insert_line_at(1, "x");
        assert_eq!(pt.all_lines(), vec!["a", "x", "b", "c"]);
        assert_eq!(pt.piece_count(), 3);
    }

    #[test]
    fn test_append_extends_last_add_piece() {
        let mut pt = table(&["a"]);
        pt.append_line("b");
        pt.append_line("c");
        assert_eq!(pt.piece_count(), 2);
        assert_eq!(pt.all_lines(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_insert_past_end_clamps() {
        let mut pt = table(&["a"]);
        pt.insert_line_at(99, "z");
        assert_eq!(pt.all_lines(), vec!["a", "z"]);
    }

    #[test]
    fn test_delete_line_positions() {
        let mut pt = table(&["a", "b", "c", "d", "e"]);
        pt.delete_line(0); // first of piece
        pt.delete_line(3); // last of piece
        pt.delete_line(1); // middle of piece
        assert_eq!(pt.all_lines(), vec!["b", "d"]);
        assert_eq!(pt.line_count(), 2);
    }

    #[test]
    fn test_delete_last_line_leaves_empty_line() {
        let mut pt = table(&["only"]);
        pt.delete_line(0);
        assert_eq!(pt.line_count(), 1);
        assert_eq!(pt.get_line(0), "");
    }

    #[test]
    fn test_delete_out_of_range_is_noop() {
        let mut pt = table(&["a"]);
        pt.delete_line(3);
        assert_eq!(pt.all_lines(), vec!["a"]);
    }

    #[test]
    fn test_is_valid_pos() {
        let pt = table(&["héllo"]);
        assert!(pt.is_valid_pos(0, 0));
        assert!(pt.is_valid_pos(0, 6));
        assert!(!pt.is_valid_pos(0, 2)); // inside é
        assert!(!pt.is_valid_pos(0, 7));
        assert!(!pt.is_valid_pos(1, 0));
    }

    #[test]
    fn test_compact_merges_contiguous_pieces() {
        let mut pt = table(&["a", "b", "c", "d"]);
        pt.split_piece(0, 2);
        assert_eq!(pt.piece_count(), 2);
        pt.compact();
        assert_eq!(pt.piece_count(), 1);
        assert_eq!(pt.all_lines(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_compact_keeps_non_contiguous_pieces() {
        let mut pt = table(&["a", "b", "c"]);
        pt.set_line(1, "B");
        pt.compact();
        assert_eq!(pt.piece_count(), 3);
        assert_eq!(pt.all_lines(), vec!["a", "B", "c"]);
    }

    #[test]
    fn test_clear() {
        let mut pt = table(&["a", "b"]);
        pt.clear();
        assert_eq!(pt.all_lines(), vec![""]);
    }
}
