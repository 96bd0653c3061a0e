//! Unified-diff rendering and patch application.

use std::fmt::Write as _;

use super::DiffHunk;

/// Render hunks as a unified diff without context lines.
///
/// Hunk headers use 1-based line numbers:
/// `@@ -{old_start + 1},{old_count} +{new_start + 1},{new_count} @@`.
pub fn unified_diff(hunks: &[DiffHunk], old_name: &str, new_name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- {old_name}");
    let _ = writeln!(out, "+++ {new_name}");

    for hunk in hunks {
        let _ = writeln!(
            out,
            "@@ -{},{} +{},{} @@",
            hunk.old_start + 1,
            hunk.old_count,
            hunk.new_start + 1,
            hunk.new_count
        );
        for line in &hunk.old_lines {
            let _ = writeln!(out, "-{line}");
        }
        for line in &hunk.new_lines {
            let _ = writeln!(out, "+{line}");
        }
    }
    out
}

/// Replay `hunks` against `original`: copy untouched lines up to each hunk,
/// splice in its new lines and skip its old ones, then copy the tail.
pub fn apply_patch<S: AsRef<str>>(original: &[S], hunks: &[DiffHunk]) -> Vec<String> {
    let mut result = Vec::with_capacity(original.len());
    let mut index = 0;

    for hunk in hunks {
        let start = hunk.old_start.min(original.len());
        while index < start {
            result.push(original[index].as_ref().to_string());
            index += 1;
        }
        result.extend(hunk.new_lines.iter().cloned());
        index += hunk.old_count;
    }

    while index < original.len() {
        result.push(original[index].as_ref().to_string());
        index += 1;
    }
    result
}
