//! Buffer editing tests
//!
//! Tests for character, text and range edits, Enter/Backspace line
//! splitting and joining, and invalid-position handling.

mod common;

use common::buffer;
use strata::text::{Buffer, Cursor, Position, Selection, SelectionKind};

// ========================================================================
// Insert Tests
// ========================================================================

#[test]
fn test_insert_text_three_segments() {
    let mut buf = buffer(&["start|end"]);
    buf.insert_text(0, 6, "one\ntwo\nthree");
    assert_eq!(buf.all_lines(), vec!["start|one", "two", "threeend"]);
}

#[test]
fn test_insert_text_at_line_start_and_end() {
    let mut buf = buffer(&["mid"]);
    buf.insert_text(0, 0, ">> ");
    buf.insert_text(0, 6, " <<");
    assert_eq!(buf.text(), ">> mid <<");
}

#[test]
fn test_insert_text_only_newlines() {
    let mut buf = buffer(&["ab"]);
    buf.insert_text(0, 1, "\n\n");
    assert_eq!(buf.all_lines(), vec!["a", "", "b"]);
}

#[test]
fn test_insert_char_on_missing_line_is_noop() {
    let mut buf = buffer(&["a"]);
    buf.insert_char(3, 0, 'x');
    assert_eq!(buf.all_lines(), vec!["a"]);
}

// ========================================================================
// Delete Tests
// ========================================================================

#[test]
fn test_delete_range_whole_lines() {
    let mut buf = buffer(&["a", "b", "c", "d"]);
    let removed = buf.delete_range(1, 0, 3, 0);
    assert_eq!(removed, "b\nc\n");
    assert_eq!(buf.all_lines(), vec!["a", "d"]);
}

#[test]
fn test_delete_range_clamps_columns() {
    let mut buf = buffer(&["abc", "def"]);
    let removed = buf.delete_range(0, 2, 1, 99);
    assert_eq!(removed, "c\ndef");
    assert_eq!(buf.all_lines(), vec!["ab"]);
}

#[test]
fn test_delete_range_past_last_line_is_noop() {
    let mut buf = buffer(&["abc"]);
    assert_eq!(buf.delete_range(0, 0, 5, 0), "");
    assert_eq!(buf.text(), "abc");
}

#[test]
fn test_delete_then_insert_restores() {
    let mut buf = buffer(&["one", "two", "three"]);
    let removed = buf.delete_range(0, 1, 2, 3);
    buf.insert_text(0, 1, &removed);
    assert_eq!(buf.all_lines(), vec!["one", "two", "three"]);
}

// ========================================================================
// Split/Join Tests
// ========================================================================

#[test]
fn test_split_at_start_makes_empty_line_above() {
    let mut buf = buffer(&["abc"]);
    buf.split_line(0, 0);
    assert_eq!(buf.all_lines(), vec!["", "abc"]);
}

#[test]
fn test_join_non_adjacent_lines() {
    let mut buf = buffer(&["a", "b", "c"]);
    buf.join_lines(0, 2);
    assert_eq!(buf.all_lines(), vec!["ac", "b"]);
}

#[test]
fn test_delete_every_line_keeps_one() {
    let mut buf = buffer(&["a", "b"]);
    buf.delete_line(0);
    buf.delete_line(0);
    assert_eq!(buf.line_count(), 1);
    assert_eq!(buf.text(), "");
}

#[test]
fn test_compact_after_edits_preserves_text() {
    let mut buf = Buffer::from_text("l0\nl1\nl2\nl3");
    for i in 0..4 {
        buf.insert_char(i, 0, '#');
    }
    let before = buf.all_lines();
    buf.compact();
    assert_eq!(buf.all_lines(), before);
    assert!(buf.piece_table().piece_count() <= 4);
}

// ========================================================================
// Cursor and Selection Tests
// ========================================================================

#[test]
fn test_cursor_follows_text_across_lines() {
    let buf = buffer(&["ab", "", "cd"]);
    let mut cursor = Cursor::new(0, 2);
    cursor.move_right(&buf);
    assert_eq!(cursor.to_position(), Position::new(1, 0));
    cursor.move_right(&buf);
    assert_eq!(cursor.to_position(), Position::new(2, 0));
    cursor.move_left(&buf);
    cursor.move_left(&buf);
    assert_eq!(cursor.to_position(), Position::new(0, 2));
}

#[test]
fn test_selection_text_kinds() {
    let buf = buffer(&["first", "second", "third"]);
    let char_sel = Selection::new(Position::new(0, 2), Position::new(1, 3));
    assert_eq!(char_sel.text(&buf), "rst\nsec");

    let line_sel = char_sel.with_kind(SelectionKind::Line);
    assert_eq!(line_sel.text(&buf), "first\nsecond\n");

    let block = Selection::new(Position::new(0, 1), Position::new(2, 3))
        .with_kind(SelectionKind::Block);
    assert_eq!(block.text(&buf), "ir\nec\nhi");
}
