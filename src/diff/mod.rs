pub mod types;
pub use types::*;

use crate::error::{DiffError, Result};
use crate::lcs::Comparison;
use crate::traverse::Visitor;
use std::borrow::Borrow;
use std::hash::Hash;

/// Coalesces traversal events into alternating same/difference hunks.
struct HunkBuilder<'a, T> {
    old: &'a [T],
    new: &'a [T],
    current: Option<Hunk<&'a T>>,
    hunks: Vec<Hunk<&'a T>>,
}

impl<'a, T> HunkBuilder<'a, T> {
    fn new(old: &'a [T], new: &'a [T]) -> Self {
        HunkBuilder {
            old,
            new,
            current: None,
            hunks: vec![],
        }
    }

    fn process(&mut self, old_at: usize, new_at: usize, edit: Edit<&'a T>) {
        let same = matches!(edit, Edit::Equal { .. });
        if self
            .current
            .as_ref()
            .is_some_and(|c| (c.kind == HunkKind::Same) != same)
        {
            self.flush();
        }

        let hunk = self.current.get_or_insert_with(|| Hunk {
            kind: if same { HunkKind::Same } else { HunkKind::Change },
            old: old_at..old_at,
            new: new_at..new_at,
            edits: vec![],
        });
        match edit {
            Edit::Equal { .. } => {
                hunk.old.end += 1;
                hunk.new.end += 1;
            }
            Edit::Delete { .. } => hunk.old.end += 1,
            Edit::Insert { .. } => hunk.new.end += 1,
        }
        hunk.edits.push(edit);
    }

    fn flush(&mut self) {
        if let Some(mut hunk) = self.current.take() {
            if hunk.kind != HunkKind::Same {
                hunk.kind = HunkKind::unmatched(&hunk.old, &hunk.new);
            }
            self.hunks.push(hunk);
        }
    }

    fn finish(mut self) -> Vec<Hunk<&'a T>> {
        self.flush();
        self.hunks
    }
}

impl<'a, T> Visitor for HunkBuilder<'a, T> {
    fn matched(&mut self, old: usize, new: usize) {
        let item = &self.old[old];
        self.process(old, new, Edit::Equal { old, new, item });
    }

    fn discard_old(&mut self, old: usize, new: usize) {
        let item = &self.old[old];
        self.process(old, new, Edit::Delete { old, item });
    }

    fn discard_new(&mut self, old: usize, new: usize) {
        let item = &self.new[new];
        self.process(old, new, Edit::Insert { new, item });
    }
}

struct RowBuilder<'a, T> {
    old: &'a [T],
    new: &'a [T],
    rows: Vec<Row<&'a T>>,
}

impl<'a, T> Visitor for RowBuilder<'a, T> {
    fn matched(&mut self, old: usize, new: usize) {
        self.rows.push(Row::Match(&self.old[old], &self.new[new]));
    }

    fn discard_old(&mut self, old: usize, _new: usize) {
        self.rows.push(Row::Delete(&self.old[old]));
    }

    fn discard_new(&mut self, _old: usize, new: usize) {
        self.rows.push(Row::Insert(&self.new[new]));
    }

    fn changed(&mut self, old: usize, new: usize) {
        self.rows.push(Row::Change(&self.old[old], &self.new[new]));
    }
}

impl<'a, T> Comparison<'a, T> {
    /// The edit script as alternating same and difference hunks covering
    /// both sequences.
    pub fn diff(&self) -> Vec<Hunk<&'a T>> {
        let mut builder = HunkBuilder::new(self.old, self.new);
        self.traverse_sequences(&mut builder);
        builder.finish()
    }

    /// Side-by-side rows, pairing deletions with insertions of the same gap.
    pub fn sdiff(&self) -> Vec<Row<&'a T>> {
        let mut builder = RowBuilder {
            old: self.old,
            new: self.new,
            rows: Vec::with_capacity(self.old.len().max(self.new.len())),
        };
        self.traverse_balanced(&mut builder);
        builder.rows
    }

    pub fn compact_diff(&self) -> CompactDiff {
        let mut bounds = vec![0, 0];
        let mut pairs = self.matches.pairs().peekable();
        let (mut ai, mut bi) = (0, 0);
        loop {
            while pairs.next_if(|&(i, j)| i == ai && j == bi).is_some() {
                ai += 1;
                bi += 1;
            }
            bounds.extend([ai, bi]);
            match pairs.peek() {
                Some(&(i, j)) => {
                    ai = i;
                    bi = j;
                    bounds.extend([ai, bi]);
                }
                None => break,
            }
        }
        if ai < self.old.len() || bi < self.new.len() {
            bounds.extend([self.old.len(), self.new.len()]);
        }
        CompactDiff(bounds)
    }
}

/// Computes the hunks turning `old` into `new`.
///
/// # Examples
///
/// ```
/// use lcsdiff::{diff, Edit, HunkKind};
///
/// let old = vec!["a", "b", "c"];
/// let new = vec!["a", "b", "d"];
/// let hunks = diff(&old, &new);
/// assert_eq!(hunks.len(), 2);
/// assert_eq!(hunks[0].kind, HunkKind::Same);
/// assert_eq!(hunks[1].kind, HunkKind::Change);
/// assert_eq!(
///     hunks[1].edits,
///     vec![
///         Edit::Delete { old: 2, item: &"c" },
///         Edit::Insert { new: 2, item: &"d" },
///     ]
/// );
/// ```
pub fn diff<'a, T: Hash + Eq>(old: &'a [T], new: &'a [T]) -> Vec<Hunk<&'a T>> {
    Comparison::new(old, new).diff()
}

/// Computes the hunks between the lines of two strings, split on `\n`.
pub fn diff_lines<'a>(old: &'a str, new: &'a str) -> Vec<Hunk<&'a str>> {
    let old_lines: Vec<&str> = old.split('\n').collect();
    let new_lines: Vec<&str> = new.split('\n').collect();
    Comparison::new(&old_lines, &new_lines)
        .diff()
        .into_iter()
        .map(|hunk| hunk.map(|line| *line))
        .collect()
}

pub fn sdiff<'a, T: Hash + Eq>(old: &'a [T], new: &'a [T]) -> Vec<Row<&'a T>> {
    Comparison::new(old, new).sdiff()
}

pub fn compact_diff<T: Hash + Eq>(old: &[T], new: &[T]) -> CompactDiff {
    Comparison::new(old, new).compact_diff()
}

/// Replays `hunks` onto `old`.
///
/// Old elements between hunks are copied unchanged, so both complete diffs
/// and diffs filtered down to their difference hunks can be applied. Every
/// equal or deleted item must match the old sequence at its position.
pub fn apply<T, U>(old: &[T], hunks: &[Hunk<U>]) -> Result<Vec<T>>
where
    T: Clone + PartialEq,
    U: Borrow<T>,
{
    let mut result = Vec::with_capacity(old.len());
    let mut old_line = 0;

    for hunk in hunks {
        if hunk.old.start < old_line || hunk.old.start > old.len() {
            return Err(DiffError::invalid(format!(
                "hunk at old index {} cannot be applied after index {}",
                hunk.old.start, old_line
            )));
        }
        result.extend_from_slice(&old[old_line..hunk.old.start]);
        old_line = hunk.old.start;

        for edit in &hunk.edits {
            match edit {
                Edit::Equal { old: at, item, .. } | Edit::Delete { old: at, item } => {
                    let expected: &T = item.borrow();
                    if *at != old_line || old.get(old_line) != Some(expected) {
                        return Err(DiffError::invalid(format!(
                            "context mismatch at old index {at}"
                        )));
                    }
                    if matches!(edit, Edit::Equal { .. }) {
                        result.push(old[old_line].clone());
                    }
                    old_line += 1;
                }
                Edit::Insert { item, .. } => {
                    let item: &T = item.borrow();
                    result.push(item.clone());
                }
            }
        }
    }

    result.extend_from_slice(&old[old_line..]);
    Ok(result)
}
