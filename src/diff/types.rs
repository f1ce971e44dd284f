use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HunkKind {
    /// Matched elements present in both sequences.
    Same,
    /// Elements only in the old sequence.
    Delete,
    /// Elements only in the new sequence.
    Insert,
    /// Elements removed from the old sequence and replaced by new ones.
    Change,
}

impl HunkKind {
    /// Kind of an unmatched run covering the given ranges.
    pub(crate) fn unmatched(old: &Range<usize>, new: &Range<usize>) -> Self {
        match (old.is_empty(), new.is_empty()) {
            (false, true) => HunkKind::Delete,
            (true, false) => HunkKind::Insert,
            _ => HunkKind::Change,
        }
    }
}

/// Index ranges of one hunk in both sequences.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Span {
    pub kind: HunkKind,
    pub old: Range<usize>,
    pub new: Range<usize>,
}

/// A single element of an edit script together with its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit<T> {
    Equal { old: usize, new: usize, item: T },
    Delete { old: usize, item: T },
    Insert { new: usize, item: T },
}

impl<T> Edit<T> {
    pub fn item(&self) -> &T {
        match self {
            Edit::Equal { item, .. } | Edit::Delete { item, .. } | Edit::Insert { item, .. } => {
                item
            }
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Edit<U> {
        match self {
            Edit::Equal { old, new, item } => Edit::Equal { old, new, item: f(item) },
            Edit::Delete { old, item } => Edit::Delete { old, item: f(item) },
            Edit::Insert { new, item } => Edit::Insert { new, item: f(item) },
        }
    }
}

/// A maximal run of matched or unmatched elements.
///
/// Equal edits carry the element of the old sequence. Within a `Change`
/// hunk every delete precedes every insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk<T> {
    pub kind: HunkKind,
    pub old: Range<usize>,
    pub new: Range<usize>,
    pub edits: Vec<Edit<T>>,
}

impl<T> Hunk<T> {
    pub fn span(&self) -> Span {
        Span {
            kind: self.kind,
            old: self.old.clone(),
            new: self.new.clone(),
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Hunk<U> {
        Hunk {
            kind: self.kind,
            old: self.old,
            new: self.new,
            edits: self.edits.into_iter().map(|e| e.map(&mut f)).collect(),
        }
    }
}

/// One aligned row of a side-by-side diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row<T> {
    Match(T, T),
    Delete(T),
    Insert(T),
    Change(T, T),
}

impl<T> Row<T> {
    /// The classic single-character marker of the row.
    pub fn tag(&self) -> char {
        match self {
            Row::Match(..) => 'u',
            Row::Delete(_) => '-',
            Row::Insert(_) => '+',
            Row::Change(..) => 'c',
        }
    }

    pub fn old_item(&self) -> Option<&T> {
        match self {
            Row::Match(a, _) | Row::Change(a, _) | Row::Delete(a) => Some(a),
            Row::Insert(_) => None,
        }
    }

    pub fn new_item(&self) -> Option<&T> {
        match self {
            Row::Match(_, b) | Row::Change(_, b) | Row::Insert(b) => Some(b),
            Row::Delete(_) => None,
        }
    }
}

/// Flat boundary encoding of the hunk partition.
///
/// The vector holds `(old, new)` index pairs starting with `(0, 0)`. The
/// run between pair `k` and pair `k + 1` is matched for even `k` and
/// unmatched for odd `k`; only the leading matched run may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactDiff(pub(crate) Vec<usize>);

impl CompactDiff {
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.0
    }

    /// Decodes the boundaries into non-empty spans.
    pub fn spans(&self) -> Vec<Span> {
        let pairs: Vec<&[usize]> = self.0.chunks_exact(2).collect();
        pairs
            .windows(2)
            .enumerate()
            .filter_map(|(k, w)| {
                let old = w[0][0]..w[1][0];
                let new = w[0][1]..w[1][1];
                if old.is_empty() && new.is_empty() {
                    return None;
                }
                let kind = if k % 2 == 0 {
                    HunkKind::Same
                } else {
                    HunkKind::unmatched(&old, &new)
                };
                Some(Span { kind, old, new })
            })
            .collect()
    }
}
