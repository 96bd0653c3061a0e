//! Three-way merge of two edited copies against their common base.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::myers::myers_diff;
use super::DiffType;

/// Outcome of a three-way merge
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeResult {
    pub lines: Vec<String>,
    pub has_conflicts: bool,
    pub conflict_count: usize,
}

/// Names written after the `<<<<<<<` and `>>>>>>>` conflict markers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeLabels {
    pub ours: String,
    pub theirs: String,
}

impl Default for MergeLabels {
    fn default() -> Self {
        Self {
            ours: "ours".to_string(),
            theirs: "theirs".to_string(),
        }
    }
}

/// One side's changes relative to the base, keyed by base line index.
/// Insertions are anchored before the base line they are keyed by.
#[derive(Debug, Default)]
struct SideChanges {
    deleted: HashSet<usize>,
    inserted: HashMap<usize, Vec<String>>,
}

impl SideChanges {
    fn new<B, S>(base: &[B], side: &[S]) -> Self
    where
        B: AsRef<str>,
        S: AsRef<str>,
    {
        let mut changes = Self::default();
        for edit in myers_diff(base, side) {
            match edit.kind {
                DiffType::Delete => {
                    changes.deleted.insert(edit.old_index);
                }
                DiffType::Insert => changes
                    .inserted
                    .entry(edit.old_index)
                    .or_default()
                    .push(side[edit.new_index].as_ref().to_string()),
                DiffType::Equal | DiffType::Replace => {}
            }
        }
        changes
    }
}

/// Merge `ours` and `theirs` against `base`, marking conflicts with
/// `ours`/`theirs` labels
pub fn merge3<B, O, T>(base: &[B], ours: &[O], theirs: &[T]) -> MergeResult
where
    B: AsRef<str>,
    O: AsRef<str>,
    T: AsRef<str>,
{
    merge3_with_labels(base, ours, theirs, &MergeLabels::default())
}

/// Merge `ours` and `theirs` against `base`.
///
/// Insertions anchored at the same base line are taken from whichever side
/// made them; identical insertions from both sides are taken once, and
/// differing ones become a conflict block. A base line survives unless
/// either side deleted it.
pub fn merge3_with_labels<B, O, T>(
    base: &[B],
    ours: &[O],
    theirs: &[T],
    labels: &MergeLabels,
) -> MergeResult
where
    B: AsRef<str>,
    O: AsRef<str>,
    T: AsRef<str>,
{
    let ours_changes = SideChanges::new(base, ours);
    let theirs_changes = SideChanges::new(base, theirs);
    let mut result = MergeResult::default();

    for (index, line) in base.iter().enumerate() {
        emit_insertions(index, &ours_changes, &theirs_changes, labels, &mut result);
        if !ours_changes.deleted.contains(&index) && !theirs_changes.deleted.contains(&index) {
            result.lines.push(line.as_ref().to_string());
        }
    }
    emit_insertions(base.len(), &ours_changes, &theirs_changes, labels, &mut result);

    if result.has_conflicts {
        tracing::debug!(conflicts = result.conflict_count, "merge produced conflicts");
    }
    result
}

fn emit_insertions(
    index: usize,
    ours: &SideChanges,
    theirs: &SideChanges,
    labels: &MergeLabels,
    result: &mut MergeResult,
) {
    match (ours.inserted.get(&index), theirs.inserted.get(&index)) {
        (Some(a), Some(b)) if a == b => result.lines.extend(a.iter().cloned()),
        (Some(a), Some(b)) => {
            result.has_conflicts = true;
            result.conflict_count += 1;
            result.lines.push(format!("<<<<<<< {}", labels.ours));
            result.lines.extend(a.iter().cloned());
            result.lines.push("=======".to_string());
            result.lines.extend(b.iter().cloned());
            result.lines.push(format!(">>>>>>> {}", labels.theirs));
        }
        (Some(only), None) | (None, Some(only)) => result.lines.extend(only.iter().cloned()),
        (None, None) => {}
    }
}
