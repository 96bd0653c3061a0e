//! Line-based diff, patch and three-way merge.
//!
//! Everything here is a pure function over line sequences. Nothing depends
//! on [`Buffer`](crate::text::Buffer), so the same code diffs two buffers,
//! two files, or any other pair of line lists.
//!
//! ```
//! use strata::diff::{apply_patch, diff};
//!
//! let old = ["x", "y"];
//! let new = ["x", "z", "y"];
//! let hunks = diff(&old, &new);
//! assert_eq!(apply_patch(&old, &hunks), new);
//! ```

mod merge;
mod myers;
mod unified;

use serde::{Deserialize, Serialize};

pub use merge::{merge3, merge3_with_labels, MergeLabels, MergeResult};
pub use myers::{edits_to_hunks, myers_diff, Edit};
pub use unified::{apply_patch, unified_diff};

pub use crate::util::split_lines;

/// Kind of a diff step or hunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffType {
    Equal,
    Insert,
    Delete,
    Replace,
}

/// A contiguous run of changed lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffHunk {
    #[serde(rename = "type")]
    pub kind: DiffType,
    /// Zero-based index of the first affected old line
    pub old_start: usize,
    pub old_count: usize,
    /// Zero-based index of the first affected new line
    pub new_start: usize,
    pub new_count: usize,
    pub old_lines: Vec<String>,
    pub new_lines: Vec<String>,
}

/// Hunks turning `old` into `new`
pub fn diff<A, B>(old: &[A], new: &[B]) -> Vec<DiffHunk>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let edits = myers_diff(old, new);
    edits_to_hunks(&edits, old, new)
}

/// Diff two texts split with [`split_lines`]
pub fn diff_text(old: &str, new: &str) -> Vec<DiffHunk> {
    diff(&split_lines(old), &split_lines(new))
}

/// Lines added across all hunks
pub fn count_insertions(hunks: &[DiffHunk]) -> usize {
    hunks.iter().map(|h| h.new_count).sum()
}

/// Lines removed across all hunks
pub fn count_deletions(hunks: &[DiffHunk]) -> usize {
    hunks.iter().map(|h| h.old_count).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_of_equal_inputs_is_empty() {
        let a = ["one", "two"];
        assert!(diff(&a, &a).is_empty());
        assert!(diff_text("", "").is_empty());
    }

    #[test]
    fn test_diff_text_trailing_newline() {
        let hunks = diff_text("a\nb\n", "a\nc\n");
        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].kind, DiffType::Replace);
        assert_eq!(hunks[0].old_start, 1);
        assert_eq!(hunks[0].new_start, 1);
    }

    #[test]
    fn test_counts() {
        let hunks = diff(&["a", "b", "c"], &["a", "x", "y", "c", "d"]);
        assert_eq!(count_insertions(&hunks), 3);
        assert_eq!(count_deletions(&hunks), 1);
    }

    #[test]
    fn test_hunk_serializes_type_lowercase() {
        let hunks = diff(&["a"], &["b"]);
        let json = serde_json::to_value(&hunks[0]).unwrap();
        assert_eq!(json["type"], "replace");
        assert_eq!(json["old_lines"][0], "a");
    }
}
