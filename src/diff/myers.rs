//! Myers O((N+M)·D) shortest edit script and hunk grouping.

use super::{DiffHunk, DiffType};

/// One step of an edit script. `old_index`/`new_index` are the positions in
/// the old and new sequences at which the step applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edit {
    pub kind: DiffType,
    pub old_index: usize,
    pub new_index: usize,
}

impl Edit {
    fn new(kind: DiffType, old_index: isize, new_index: isize) -> Self {
        Self {
            kind,
            old_index: old_index as usize,
            new_index: new_index as usize,
        }
    }
}

/// Shortest edit script turning `a` into `b`, as an ordered list of
/// Equal/Insert/Delete steps
pub fn myers_diff<A, B>(a: &[A], b: &[B]) -> Vec<Edit>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let n = a.len();
    let m = b.len();

    if n == 0 {
        return (0..m)
            .map(|j| Edit {
                kind: DiffType::Insert,
                old_index: 0,
                new_index: j,
            })
            .collect();
    }
    if m == 0 {
        return (0..n)
            .map(|i| Edit {
                kind: DiffType::Delete,
                old_index: i,
                new_index: 0,
            })
            .collect();
    }

    let (n, m) = (n as isize, m as isize);
    let max_d = n + m;
    let idx = |k: isize| (k + max_d) as usize;
    let same = |x: isize, y: isize| a[x as usize].as_ref() == b[y as usize].as_ref();

    let mut v = vec![0isize; 2 * max_d as usize + 1];
    // v as it stood before each depth
    let mut trace: Vec<Vec<isize>> = Vec::new();

    let mut found = false;
    'search: for d in 0..=max_d {
        trace.push(v.clone());

        let mut k = -d;
        while k <= d {
            let mut x = if k == -d || (k != d && v[idx(k - 1)] < v[idx(k + 1)]) {
                v[idx(k + 1)]
            } else {
                v[idx(k - 1)] + 1
            };
            let mut y = x - k;

            while x < n && y < m && same(x, y) {
                x += 1;
                y += 1;
            }
            v[idx(k)] = x;

            if x >= n && y >= m {
                found = true;
                break 'search;
            }
            k += 2;
        }
    }
    debug_assert!(found, "edit script exceeded n + m rounds");

    let mut edits = Vec::new();
    let (mut x, mut y) = (n, m);

    for (d, vd) in trace.iter().enumerate().rev() {
        let d = d as isize;
        let k = x - y;

        let prev_k = if k == -d || (k != d && vd[idx(k - 1)] < vd[idx(k + 1)]) {
            k + 1
        } else {
            k - 1
        };
        let prev_x = vd[idx(prev_k)];
        let prev_y = prev_x - prev_k;

        while x > prev_x && y > prev_y {
            x -= 1;
            y -= 1;
            edits.push(Edit::new(DiffType::Equal, x, y));
        }

        if d > 0 {
            if x == prev_x {
                y -= 1;
                edits.push(Edit::new(DiffType::Insert, x, y));
            } else {
                x -= 1;
                edits.push(Edit::new(DiffType::Delete, x, y));
            }
        }
    }

    edits.reverse();
    edits
}

/// Merge each run of consecutive non-Equal edits into one hunk
pub fn edits_to_hunks<A, B>(edits: &[Edit], old: &[A], new: &[B]) -> Vec<DiffHunk>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let mut hunks = Vec::new();
    let mut i = 0;

    while i < edits.len() {
        if edits[i].kind == DiffType::Equal {
            i += 1;
            continue;
        }

        let mut hunk = DiffHunk {
            kind: DiffType::Insert,
            old_start: edits[i].old_index,
            old_count: 0,
            new_start: edits[i].new_index,
            new_count: 0,
            old_lines: Vec::new(),
            new_lines: Vec::new(),
        };

        while i < edits.len() && edits[i].kind != DiffType::Equal {
            let edit = edits[i];
            match edit.kind {
                DiffType::Delete => {
                    hunk.old_lines.push(old[edit.old_index].as_ref().to_string());
                    hunk.old_count += 1;
                }
                DiffType::Insert => {
                    hunk.new_lines.push(new[edit.new_index].as_ref().to_string());
                    hunk.new_count += 1;
                }
                DiffType::Equal | DiffType::Replace => {}
            }
            i += 1;
        }

        hunk.kind = match (hunk.old_count > 0, hunk.new_count > 0) {
            (true, true) => DiffType::Replace,
            (true, false) => DiffType::Delete,
            _ => DiffType::Insert,
        };
        hunks.push(hunk);
    }

    hunks
}
