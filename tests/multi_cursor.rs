//! Multi-cursor behavior tests
//!
//! Tests for multi-cursor operations including:
//! - Adding/removing cursors
//! - Batch edits in reverse document order
//! - Line joins during backspace/delete
//! - Next-match cursor placement

mod common;

use common::{buffer, cursor_positions, cursors_at};
use strata::multi_cursor::MultiCursor;

// ========================================================================
// Cursor Management Tests
// ========================================================================

#[test]
fn test_new_has_single_primary() {
    let mc = MultiCursor::new();
    assert_eq!(mc.count(), 1);
    assert!(!mc.is_active());
    assert_eq!((mc.primary().line, mc.primary().column), (0, 0));
}

#[test]
fn test_clear_secondary_keeps_primary() {
    let mut mc = cursors_at(&[(3, 1), (0, 0), (5, 2)]);
    mc.clear_secondary();
    assert_eq!(cursor_positions(&mc), vec![(3, 1)]);
}

#[test]
fn test_add_cursors_on_lines_skips_existing() {
    let mut mc = cursors_at(&[(1, 2)]);
    mc.add_cursors_on_lines(0, 3, 2);
    assert_eq!(
        cursor_positions(&mc),
        vec![(1, 2), (0, 2), (2, 2), (3, 2)]
    );
}

// ========================================================================
// Batch Edit Ordering Tests
// ========================================================================

#[test]
fn test_insert_matches_manual_right_to_left() {
    let mut expected = buffer(&["hello world"]);
    expected.insert_text(0, 5, "X");
    expected.insert_text(0, 2, "X");

    let mut buf = buffer(&["hello world"]);
    let mut mc = cursors_at(&[(0, 5), (0, 2)]);
    mc.insert_at_all(&mut buf, "X");

    assert_eq!(buf.all_lines(), expected.all_lines());
    assert_eq!(cursor_positions(&mc), vec![(0, 7), (0, 3)]);
}

#[test]
fn test_insert_on_many_lines() {
    let mut buf = buffer(&["a", "b", "c"]);
    let mut mc = cursors_at(&[(0, 0), (1, 0), (2, 0)]);
    mc.insert_at_all(&mut buf, "- ");
    assert_eq!(buf.all_lines(), vec!["- a", "- b", "- c"]);
    assert_eq!(cursor_positions(&mc), vec![(0, 2), (1, 2), (2, 2)]);
}

#[test]
fn test_insert_newline_at_all() {
    let mut buf = buffer(&["ab", "cd"]);
    let mut mc = cursors_at(&[(0, 1), (1, 1)]);
    mc.insert_at_all(&mut buf, "\n");
    assert_eq!(buf.all_lines(), vec!["a", "b", "c", "d"]);
    assert_eq!(cursor_positions(&mc), vec![(1, 0), (3, 0)]);
}

#[test]
fn test_backspace_at_line_starts_joins_every_line() {
    let mut buf = buffer(&["one", "two", "three"]);
    let mut mc = cursors_at(&[(1, 0), (2, 0)]);
    mc.backspace_at_all(&mut buf);
    assert_eq!(buf.all_lines(), vec!["onetwothree"]);
    assert_eq!(cursor_positions(&mc), vec![(0, 3), (0, 6)]);
}

#[test]
fn test_backspace_mixed_join_and_char() {
    let mut buf = buffer(&["ab", "cd", "ef"]);
    let mut mc = cursors_at(&[(1, 0), (2, 2)]);
    mc.backspace_at_all(&mut buf);
    assert_eq!(buf.all_lines(), vec!["abcd", "e"]);
    assert_eq!(cursor_positions(&mc), vec![(0, 2), (1, 1)]);
}

#[test]
fn test_backspace_at_buffer_start_is_noop() {
    let mut buf = buffer(&["ab"]);
    let mut mc = cursors_at(&[(0, 0)]);
    mc.backspace_at_all(&mut buf);
    assert_eq!(buf.all_lines(), vec!["ab"]);
}

#[test]
fn test_delete_at_line_ends() {
    let mut buf = buffer(&["a", "b", "c"]);
    let mut mc = cursors_at(&[(0, 1), (1, 1)]);
    mc.delete_at_all(&mut buf);
    assert_eq!(buf.all_lines(), vec!["abc"]);
    assert_eq!(cursor_positions(&mc), vec![(0, 1), (0, 2)]);
}

#[test]
fn test_stale_cursor_is_clamped_before_edit() {
    let mut buf = buffer(&["abc"]);
    let mut mc = cursors_at(&[(0, 1), (7, 40)]);
    mc.insert_at_all(&mut buf, "!");
    assert_eq!(buf.all_lines(), vec!["a!bc!"]);
    assert_eq!(cursor_positions(&mc), vec![(0, 2), (0, 5)]);
}

// ========================================================================
// Movement Tests
// ========================================================================

#[test]
fn test_move_all_left_right_wrap() {
    let buf = buffer(&["ab", "cd"]);
    let mut mc = cursors_at(&[(0, 2), (1, 0)]);
    mc.move_all_right(&buf);
    assert_eq!(cursor_positions(&mc), vec![(1, 0), (1, 1)]);
    mc.move_all_left(&buf);
    assert_eq!(cursor_positions(&mc), vec![(0, 2), (1, 0)]);
}

#[test]
fn test_move_all_to_line_bounds() {
    let buf = buffer(&["abc", "de"]);
    let mut mc = cursors_at(&[(0, 1), (1, 1)]);
    mc.move_all_to_line_end(&buf);
    assert_eq!(cursor_positions(&mc), vec![(0, 3), (1, 2)]);
    mc.move_all_to_line_start();
    assert_eq!(cursor_positions(&mc), vec![(0, 0), (1, 0)]);
}

// ========================================================================
// Matching and Ordering Tests
// ========================================================================

#[test]
fn test_next_match_wraps_to_top() {
    let buf = buffer(&["word", "x", "word here"]);
    let mut mc = cursors_at(&[(2, 0)]);
    assert_eq!(mc.add_cursor_at_next_match(&buf, "word"), Some(1));
    assert_eq!(cursor_positions(&mc), vec![(2, 0), (0, 0)]);
}

#[test]
fn test_dedup_never_empties() {
    let mut mc = cursors_at(&[(1, 1), (1, 1), (1, 1)]);
    mc.dedup();
    assert_eq!(cursor_positions(&mc), vec![(1, 1)]);
}

#[test]
fn test_sort_orders_top_to_bottom() {
    let mut mc = cursors_at(&[(2, 0), (0, 4), (0, 1)]);
    mc.sort();
    assert_eq!(cursor_positions(&mc), vec![(0, 1), (0, 4), (2, 0)]);
}
